pub mod synthetic_rgbd;
