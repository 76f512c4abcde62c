pub mod fortune_category;
pub mod notice;
pub mod site_setting;
