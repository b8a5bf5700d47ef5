//! Text sources for resumes and job descriptions
//! Handles file type detection and plain-text extraction

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
