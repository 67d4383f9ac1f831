pub mod fat16;
