pub mod ad_copy_dto;

pub use ad_copy_dto::{
    AdCopyBatchDto, AdCopyDto, ExportAdCopiesDto, ExportResultDto, GenerateAdCopiesDto,
};
