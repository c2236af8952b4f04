pub mod input;
pub mod product_form;
pub mod view_table;
