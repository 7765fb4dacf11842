pub mod about;
pub mod activity;
pub mod auth;
pub mod contact;
pub mod faq;
pub mod image;
pub mod poi;
pub mod popup;
pub mod restaurant;
pub mod review;
pub mod section;
