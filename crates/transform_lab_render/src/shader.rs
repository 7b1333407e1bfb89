//! WGSL sources for the quad programs
//!
//! Each program is a vertex stage linked with the shared textured fragment
//! stage. Sources ship embedded in the binary and can be overridden from a
//! directory at startup; a missing override file falls back to the embedded
//! source for that stage only.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::pipeline::ProgramKind;

/// One WGSL source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Fragment stage shared by both programs
    Textured,
    /// Vertex stage of the 2D program
    Quad2D,
    /// Vertex stage of the 3D program
    Quad3D,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 3] = [
        ShaderStage::Textured,
        ShaderStage::Quad2D,
        ShaderStage::Quad3D,
    ];

    /// File name inside a shader override directory
    pub fn file_name(self) -> &'static str {
        match self {
            ShaderStage::Textured => "textured.wgsl",
            ShaderStage::Quad2D => "quad_2d.wgsl",
            ShaderStage::Quad3D => "quad_3d.wgsl",
        }
    }

    /// Source compiled into the binary
    pub fn embedded_source(self) -> &'static str {
        match self {
            ShaderStage::Textured => include_str!("shaders/textured.wgsl"),
            ShaderStage::Quad2D => include_str!("shaders/quad_2d.wgsl"),
            ShaderStage::Quad3D => include_str!("shaders/quad_3d.wgsl"),
        }
    }

    /// Vertex stage of a program
    pub fn vertex_for(kind: ProgramKind) -> Self {
        match kind {
            ProgramKind::Flat2D => ShaderStage::Quad2D,
            ProgramKind::Spatial3D => ShaderStage::Quad3D,
        }
    }
}

/// Shader compilation and linking errors
#[derive(Debug, Clone)]
pub enum ShaderError {
    /// A module failed WGSL validation
    Compile { label: String, message: String },
    /// A render pipeline could not be built from valid modules
    Link { label: String, message: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { label, message } => {
                write!(f, "Shader '{}' compilation error: {}", label, message)
            }
            ShaderError::Link { label, message } => {
                write!(f, "Program '{}' linking error: {}", label, message)
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// The three WGSL sources the quad programs are built from
#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    textured: String,
    quad_2d: String,
    quad_3d: String,
    /// Directory the sources were read from, `None` when fully embedded
    origin: Option<PathBuf>,
}

impl ShaderLibrary {
    /// Library made of the embedded sources only
    pub fn embedded() -> Self {
        Self {
            textured: ShaderStage::Textured.embedded_source().to_string(),
            quad_2d: ShaderStage::Quad2D.embedded_source().to_string(),
            quad_3d: ShaderStage::Quad3D.embedded_source().to_string(),
            origin: None,
        }
    }

    /// Read sources from `dir`, using the embedded source for any stage
    /// whose file cannot be read
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let mut library = Self::embedded();
        let mut loaded = 0;

        for stage in ShaderStage::ALL {
            let path = dir.join(stage.file_name());
            match std::fs::read_to_string(&path) {
                Ok(source) => {
                    log::debug!("Loaded shader {}", path.display());
                    *library.source_mut(stage) = source;
                    loaded += 1;
                }
                Err(e) => {
                    log::warn!(
                        "Shader file {} not readable ({}), using embedded source",
                        path.display(),
                        e
                    );
                }
            }
        }

        if loaded > 0 {
            library.origin = Some(dir.to_path_buf());
        }
        log::info!(
            "Loaded {}/{} shader stages from {}",
            loaded,
            ShaderStage::ALL.len(),
            dir.display()
        );
        library
    }

    /// Source of a single stage
    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Textured => &self.textured,
            ShaderStage::Quad2D => &self.quad_2d,
            ShaderStage::Quad3D => &self.quad_3d,
        }
    }

    fn source_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Textured => &mut self.textured,
            ShaderStage::Quad2D => &mut self.quad_2d,
            ShaderStage::Quad3D => &mut self.quad_3d,
        }
    }

    /// Full WGSL module for a program: vertex stage followed by the shared
    /// fragment stage
    pub fn program_source(&self, kind: ProgramKind) -> String {
        let vertex = self.source(ShaderStage::vertex_for(kind));
        format!("{}\n{}", vertex, self.textured)
    }

    /// True when every stage comes from the binary
    pub fn is_embedded(&self) -> bool {
        self.origin.is_none()
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Compile a WGSL module, reporting validation failures as errors instead of
/// leaving them to the device's uncaptured error handler
pub fn compile_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(module),
        Some(err) => Err(ShaderError::Compile {
            label: label.to_string(),
            message: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(source: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
    }

    #[test]
    fn test_embedded_programs_are_valid_wgsl() {
        let library = ShaderLibrary::embedded();
        for kind in [ProgramKind::Flat2D, ProgramKind::Spatial3D] {
            let source = library.program_source(kind);
            if let Err(e) = validate(&source) {
                panic!("{} failed validation:\n{}", kind.label(), e);
            }
        }
    }

    #[test]
    fn test_program_source_links_shared_fragment() {
        let library = ShaderLibrary::embedded();
        let flat = library.program_source(ProgramKind::Flat2D);
        let spatial = library.program_source(ProgramKind::Spatial3D);

        for source in [&flat, &spatial] {
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
        assert!(flat.starts_with(ShaderStage::Quad2D.embedded_source()));
        assert!(spatial.starts_with(ShaderStage::Quad3D.embedded_source()));
    }

    #[test]
    fn test_load_missing_directory_falls_back() {
        let library = ShaderLibrary::load("/nonexistent/shader/dir");
        assert!(library.is_embedded());
        for stage in ShaderStage::ALL {
            assert_eq!(library.source(stage), stage.embedded_source());
        }
    }

    #[test]
    fn test_load_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        let custom = "// custom 2D stage\n";
        std::fs::write(dir.path().join("quad_2d.wgsl"), custom).unwrap();

        let library = ShaderLibrary::load(dir.path());
        assert!(!library.is_embedded());
        assert_eq!(library.origin(), Some(dir.path()));
        assert_eq!(library.source(ShaderStage::Quad2D), custom);
        assert_eq!(
            library.source(ShaderStage::Quad3D),
            ShaderStage::Quad3D.embedded_source()
        );
        assert_eq!(
            library.source(ShaderStage::Textured),
            ShaderStage::Textured.embedded_source()
        );
    }

    #[test]
    fn test_shader_error_display() {
        let err = ShaderError::Compile {
            label: "Quad 2D".to_string(),
            message: "bad token".to_string(),
        };
        assert_eq!(err.to_string(), "Shader 'Quad 2D' compilation error: bad token");

        let err = ShaderError::Link {
            label: "Quad 3D".to_string(),
            message: "mismatch".to_string(),
        };
        assert_eq!(err.to_string(), "Program 'Quad 3D' linking error: mismatch");
    }
}
