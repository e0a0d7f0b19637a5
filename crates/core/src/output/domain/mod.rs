pub mod record_sink;
pub mod track_record;
