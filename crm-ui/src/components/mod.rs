pub mod auth_form;
pub mod entity_list;
pub mod navbar;
pub mod overview;
pub mod protected;
