#[macro_use]
mod macros;

agg_mod![models, utils, validation];
