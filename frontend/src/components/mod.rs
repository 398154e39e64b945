pub mod cin_form;
