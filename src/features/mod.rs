pub mod ad_copies;
