mod docs;
mod helpers;
mod stations;
