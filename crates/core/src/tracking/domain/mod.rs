pub mod object_tracker;
pub mod tracker_algorithm;
pub mod tracker_initializer;
