//! Adapter for the native `genpoints` library.
//!
//! The library exports
//!
//! ```c
//! void genpoints(const char* seq, uint32_t n, uint32_t dim, uint32_t seed, float* x);
//! const char* sequence_names(void);   // optional, ';' separated
//! void init(void);                    // optional
//! ```
//!
//! The optional entry points are probed once when the library is
//! opened; whatever was found is fixed for the lifetime of the
//! provider.

// std
use std::convert::TryFrom;
use std::env;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
// others
use lazy_static::lazy_static;
use libloading::{Library, Symbol};
use tracing::{debug, error, info};
// viewpoints
use crate::core::error::ViewpointsError;
use crate::core::sequence::{parse_sequence_names, SequenceProvider};
use crate::core::viewpoints::{Float, Result};

/// Environment variable naming the library.
pub const GENPOINTS_LIB: &str = "GENPOINTS_LIB";
pub const DEFAULT_LIBRARY: &str = "genpoints";

type GenPointsFn = unsafe extern "C" fn(*const c_char, u32, u32, u32, *mut Float);
type SequenceNamesFn = unsafe extern "C" fn() -> *const c_char;
type InitFn = unsafe extern "C" fn();

lazy_static! {
    static ref SHARED: std::result::Result<NativeProvider, (String, String)> = {
        let config = NativeConfig::from_env();
        match NativeProvider::open(&config) {
            Ok(provider) => Ok(provider),
            Err(ViewpointsError::ProviderUnavailable { library, reason }) => {
                error!(
                    library = library.as_str(),
                    reason = reason.as_str(),
                    "native sequence provider failed to load"
                );
                Err((library, reason))
            }
            Err(err) => {
                let reason: String = err.to_string();
                error!(reason = reason.as_str(), "native sequence provider failed to load");
                Err((config.library.clone(), reason))
            }
        }
    };
}

/// The process-wide provider configured from `GENPOINTS_LIB`. The
/// library is loaded on first use; if that fails, every call returns
/// the same failure and loading is never attempted again.
pub fn shared() -> Result<&'static NativeProvider> {
    match &*SHARED {
        Ok(provider) => Ok(provider),
        Err((library, reason)) => Err(ViewpointsError::ProviderUnavailable {
            library: library.clone(),
            reason: reason.clone(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeConfig {
    pub library: String,
}

impl Default for NativeConfig {
    fn default() -> Self {
        NativeConfig::new(DEFAULT_LIBRARY)
    }
}

impl NativeConfig {
    pub fn new(library: &str) -> Self {
        NativeConfig {
            library: library.to_string(),
        }
    }
    pub fn from_env() -> Self {
        NativeConfig::from_value(env::var(GENPOINTS_LIB).ok())
    }
    /// An unset or blank value selects the default library.
    pub fn from_value(value: Option<String>) -> Self {
        match value {
            Some(library) if !library.trim().is_empty() => NativeConfig::new(library.trim()),
            _ => NativeConfig::default(),
        }
    }
    /// Paths to try, in order. A bare name is turned into the platform
    /// file name and looked for in the current directory first, then on
    /// the loader's search path.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let path = Path::new(&self.library);
        let explicit = self.library.contains('/')
            || self.library.contains(std::path::MAIN_SEPARATOR)
            || path.extension().is_some();
        if explicit {
            vec![path.to_path_buf()]
        } else {
            let file_name = libloading::library_filename(&self.library);
            vec![Path::new(".").join(&file_name), PathBuf::from(file_name)]
        }
    }
}

pub struct NativeProvider {
    name: String,
    genpoints: GenPointsFn,
    sequence_names: Option<Vec<String>>,
    has_init: bool,
    // keeps the function pointers above valid
    _library: Library,
}

impl NativeProvider {
    pub fn open(config: &NativeConfig) -> Result<Self> {
        let mut reasons: Vec<String> = Vec::new();
        for candidate in config.candidates() {
            // loading runs the library's initializers
            match unsafe { Library::new(&candidate) } {
                Ok(library) => return NativeProvider::negotiate(config, &candidate, library),
                Err(err) => {
                    let reason: String = format!("{}: {}", candidate.display(), err);
                    debug!(reason = reason.as_str(), "unable to load");
                    reasons.push(reason);
                }
            }
        }
        Err(ViewpointsError::ProviderUnavailable {
            library: config.library.clone(),
            reason: reasons.join("; "),
        })
    }
    /// Resolve the mandatory symbol, probe the optional ones, and run
    /// `init` if it exists.
    fn negotiate(config: &NativeConfig, path: &Path, library: Library) -> Result<Self> {
        let genpoints: GenPointsFn = unsafe {
            let symbol: Symbol<GenPointsFn> =
                library
                    .get(b"genpoints\0")
                    .map_err(|err| ViewpointsError::ProviderUnavailable {
                        library: config.library.clone(),
                        reason: format!("{}: {}", path.display(), err),
                    })?;
            *symbol
        };
        let sequence_names_fn: Option<SequenceNamesFn> = unsafe {
            library
                .get::<SequenceNamesFn>(b"sequence_names\0")
                .ok()
                .map(|symbol| *symbol)
        };
        let init_fn: Option<InitFn> =
            unsafe { library.get::<InitFn>(b"init\0").ok().map(|symbol| *symbol) };
        if let Some(init) = init_fn {
            unsafe { init() };
        }
        let sequence_names: Option<Vec<String>> = sequence_names_fn.and_then(|names| {
            let ptr: *const c_char = unsafe { names() };
            if ptr.is_null() {
                None
            } else {
                let joined = unsafe { CStr::from_ptr(ptr) }.to_string_lossy();
                Some(parse_sequence_names(&joined))
            }
        });
        let name: String = path
            .file_name()
            .map(|file_name| file_name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.library.clone());
        info!(
            library = name.as_str(),
            sequence_names = sequence_names.is_some(),
            init = init_fn.is_some(),
            families = sequence_names.as_ref().map_or(0, |names| names.len()),
            "native sequence provider loaded"
        );
        Ok(NativeProvider {
            name,
            genpoints,
            sequence_names,
            has_init: init_fn.is_some(),
            _library: library,
        })
    }
    pub fn has_init(&self) -> bool {
        self.has_init
    }
}

impl SequenceProvider for NativeProvider {
    fn name(&self) -> &str {
        &self.name
    }
    fn genpoints(&self, family: &str, dim: u32, seed: u32, out: &mut [Float]) -> Result<()> {
        if !self.supports(family) {
            return Err(ViewpointsError::InvalidRequest(format!(
                "sequence {:?} is not provided by {}",
                family, self.name
            )));
        }
        let n: u32 = u32::try_from(out.len()).map_err(|_| {
            ViewpointsError::InvalidRequest(format!("point count {} out of range", out.len()))
        })?;
        let sequence = CString::new(family).map_err(|_| {
            ViewpointsError::InvalidRequest(format!("sequence name {:?} contains NUL", family))
        })?;
        if n == 0 {
            return Ok(());
        }
        unsafe { (self.genpoints)(sequence.as_ptr(), n, dim, seed, out.as_mut_ptr()) };
        Ok(())
    }
    fn sequence_names(&self) -> Option<&[String]> {
        self.sequence_names.as_deref()
    }
}
