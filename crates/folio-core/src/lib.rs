pub mod accordion;
pub mod bindings;
pub mod config;
pub mod contact;
pub mod counter;
pub mod draft;
pub mod filter;
pub mod form;
pub mod gallery;
pub mod keynav;
pub mod layer;
pub mod notify;
pub mod overlay;
pub mod reveal;
pub mod skills;
pub mod submit;
pub mod validate;
