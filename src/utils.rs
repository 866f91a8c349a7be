mod partial_success ;
mod naming ;

pub use partial_success::{ PartialSuccess, Merge };
pub use naming::{ lower_camel, escape_keyword, UniqueNames };
