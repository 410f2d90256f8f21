pub mod imgs2pdf;
pub mod insert;
pub mod join;
pub mod pick;
pub mod remove;
pub mod rotate;
pub mod scale;
pub mod search;
