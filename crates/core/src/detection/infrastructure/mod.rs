pub mod opencv_blob_detector;
