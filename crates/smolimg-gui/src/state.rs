use parking_lot::Mutex;
use smolimg_common::OutputFormat;
use smolimg_core::TransformRequest;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state (shared across UI and background tasks)
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppStateInner>>,
}

struct AppStateInner {
    /// Input files queue
    pub input_files: Vec<InputFile>,

    /// Target output format
    pub format: OutputFormat,

    /// Encoding quality, 1-100
    pub quality: u8,

    /// Resize percentage, 10-100
    pub resize_factor: u8,

    /// Current processing state
    pub processing: ProcessingState,

    /// Monotonic id for result cards (texture cache key)
    pub next_card_id: u64,
}

#[derive(Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl InputFile {
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }
}

/// Everything a finished result card needs to render and save
pub struct ResultCard {
    pub id: u64,
    pub original_size: usize,
    pub compressed_size: usize,
    pub savings_pct: f64,
    pub data: Vec<u8>,
    pub download_name: String,
    pub preview: Option<egui::ColorImage>,
}

#[derive(Clone)]
pub enum FileStatus {
    Pending,
    Processing,
    Done(Arc<ResultCard>),
    Failed(String),
}

/// Ids of the result cards currently held by the file list. Textures keyed
/// by any other id are stale and can be dropped.
pub fn live_card_ids(files: &[InputFile]) -> std::collections::HashSet<u64> {
    files
        .iter()
        .filter_map(|f| match &f.status {
            FileStatus::Done(card) => Some(card.id),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub enum ProcessingState {
    Idle,
    Running { current: usize, total: usize },
    Complete { success: usize, failed: usize },
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppStateInner {
                input_files: Vec::new(),
                format: OutputFormat::Webp,
                quality: 80,
                resize_factor: 100,
                processing: ProcessingState::Idle,
                next_card_id: 0,
            })),
        }
    }

    /// Add files to input queue
    pub fn add_files(&self, paths: Vec<PathBuf>) {
        let mut inner = self.inner.lock();
        for path in paths {
            // Avoid duplicates
            if !inner.input_files.iter().any(|f| f.path == path) {
                inner.input_files.push(InputFile {
                    path,
                    status: FileStatus::Pending,
                });
            }
        }
    }

    /// Clear all input files
    pub fn clear_files(&self) {
        let mut inner = self.inner.lock();
        inner.input_files.clear();
        inner.processing = ProcessingState::Idle;
    }

    /// Remove file at index
    pub fn remove_file(&self, index: usize) {
        let mut inner = self.inner.lock();
        if index < inner.input_files.len() {
            inner.input_files.remove(index);
        }
    }

    /// Get input files (cloned; cards are Arc-shared)
    pub fn input_files(&self) -> Vec<InputFile> {
        self.inner.lock().input_files.clone()
    }

    /// Update file status
    pub fn set_file_status(&self, index: usize, status: FileStatus) {
        let mut inner = self.inner.lock();
        if let Some(file) = inner.input_files.get_mut(index) {
            file.status = status;
        }
    }

    /// Reserve a fresh result-card id
    pub fn next_card_id(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.next_card_id += 1;
        inner.next_card_id
    }

    pub fn format(&self) -> OutputFormat {
        self.inner.lock().format
    }

    pub fn set_format(&self, format: OutputFormat) {
        self.inner.lock().format = format;
    }

    pub fn quality(&self) -> u8 {
        self.inner.lock().quality
    }

    pub fn set_quality(&self, quality: u8) {
        self.inner.lock().quality = quality.clamp(1, 100);
    }

    pub fn resize_factor(&self) -> u8 {
        self.inner.lock().resize_factor
    }

    pub fn set_resize_factor(&self, factor: u8) {
        self.inner.lock().resize_factor = factor.clamp(10, 100);
    }

    /// Snapshot the sidebar settings as one transform request
    pub fn transform_request(&self) -> TransformRequest {
        let inner = self.inner.lock();
        TransformRequest::new(inner.quality, inner.format, inner.resize_factor)
    }

    pub fn processing_state(&self) -> ProcessingState {
        self.inner.lock().processing.clone()
    }

    pub fn set_processing_state(&self, state: ProcessingState) {
        self.inner.lock().processing = state;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
