//! One-shot maintenance tools for the product catalog.
//!
//! Each binary under `src/bin` is an independent, manually invoked batch job:
//! - `process_batch`: optimize a folder of raw product shots into WebP variants
//! - `upload_batch`: clear the bucket, upload every optimized file, relink rows
//! - `process_hotfix`: targeted re-optimize + re-upload + relink for a few files
//! - `verify_integrity`: report orphan files and rows without images
//! - `update_sizes`: patch size columns from a slug → size table
//! - `optimize_hero`: emit portrait `-mobile` crops of the hero images
//! - `diagnose_images`: dump a row's image columns and probe the URLs
//! - `check_typos`: search table slugs and raw filenames for spelling variants
//!
//! The modules below are the shared plumbing; every tool wires them together
//! in a straight line with no state carried between runs.

pub mod audit;
pub mod config;
pub mod name;
pub mod pipeline;
pub mod remote;
pub mod scan;
pub mod sizes;
pub mod transcode;
