//! Chip drivers for the GY-85
//!
//! This module provides one driver per chip on the board:
//! - Accelerometer (ADXL345)
//! - Gyroscope (ITG3205)
//! - Magnetometer (QMC5883L)
//!
//! Drivers own their settings state and borrow the bus per call, so the
//! three chips can share one transport. [`Gy85`](crate::Gy85) sequences them.

pub mod accelerometer;
pub mod gyroscope;
pub mod magnetometer;

// Re-export main types
pub use accelerometer::{AccelDataRate, AccelRange, Adxl345, FifoMode};
pub use gyroscope::{GyroDlpf, GyroFullScale, Itg3205};
pub use magnetometer::{MagMode, MagOutputRate, MagOverSample, MagScale, Qmc5883l};
