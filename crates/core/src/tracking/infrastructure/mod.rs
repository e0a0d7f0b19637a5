pub mod opencv_tracker;
