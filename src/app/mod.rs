pub mod card_search_use_case;
pub mod catalog_use_case;
pub mod ports;
pub mod resolve_name_use_case;
