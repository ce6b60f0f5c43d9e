pub mod calendar;
pub mod catalog;
pub mod fortune;
pub mod ganzhi;
pub mod korean_lunar;
pub mod outlook;
pub mod resolver;
