pub mod casino;
pub mod checkin;
pub mod clock;
pub mod storage;
pub mod world;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
