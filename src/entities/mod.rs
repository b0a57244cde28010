//! Read-only mappings of the externally maintained apartment tables.

pub mod apartment;
pub mod area_type;
pub mod assigned_school;
pub mod kapt_detail;
pub mod kapt_info;
pub mod nearest_station;
pub mod rent;
pub mod school;
pub mod trade;
