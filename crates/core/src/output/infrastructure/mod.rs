pub mod csv_record_sink;
