pub mod article_card;
pub mod follow_list;
pub mod home;
pub mod loader;
pub mod user_page;
