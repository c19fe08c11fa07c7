//! Shader builder: compiles the WGSL stage pair and links it into a program.
//!
//! Compilation and linking run on the CPU through naga (the shader compiler
//! wgpu itself uses), so a broken shader is reported with a readable log
//! before any window or GPU device exists.
//!
//! "Linking" here is the interface check a GL linker would do: the two
//! stages are compiled separately and then matched against each other.

use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{Binding, BuiltIn, Handle, Module, Scalar, Type, TypeInner, VectorSize};

/// Entry point name expected in the vertex stage.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Entry point name expected in the fragment stage.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertex input carrying the triangle vertex position.
pub const POSITION_ATTRIBUTE: &str = "a_position";

const TRIANGLE_VERTEX_WGSL: &str = include_str!("shaders/triangle_vertex.wgsl");
const TRIANGLE_FRAGMENT_WGSL: &str = include_str!("shaders/triangle_fragment.wgsl");

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Why a program could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// A single stage failed to parse or validate. `log` is the compiler output.
    Compile { stage: ShaderStage, log: String },
    /// Both stages compiled but do not fit together. `log` is the linker output.
    Link { log: String },
}

impl ShaderError {
    /// The diagnostic text (compiler or linker log).
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => log,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "error compiling {stage} shader:\n{log}")
            }
            ShaderError::Link { log } => write!(f, "shader program failed to link: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// A compiled and linked vertex/fragment pair.
///
/// Holds the stage sources so the renderer can instantiate GPU modules from
/// exactly what was validated.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    vertex_source: String,
    fragment_source: String,
    position_location: u32,
}

impl ShaderProgram {
    /// Builds the bundled triangle program (clip-space passthrough + solid red).
    pub fn triangle() -> Result<Self, ShaderError> {
        Self::build(TRIANGLE_VERTEX_WGSL, TRIANGLE_FRAGMENT_WGSL)
    }

    /// Compiles both stages and links them.
    ///
    /// The error carries the full compiler or linker log; reporting it is up
    /// to the caller.
    pub fn build(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let vertex = compile(ShaderStage::Vertex, vertex_source)?;
        let fragment = compile(ShaderStage::Fragment, fragment_source)?;
        let position_location = link(&vertex, &fragment)?;

        log::debug!("shader program linked (a_position @ location {position_location})");
        Ok(Self {
            vertex_source: vertex_source.to_owned(),
            fragment_source: fragment_source.to_owned(),
            position_location,
        })
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    pub fn vertex_entry(&self) -> &'static str {
        VERTEX_ENTRY
    }

    pub fn fragment_entry(&self) -> &'static str {
        FRAGMENT_ENTRY
    }

    /// Shader location of the `a_position` vertex attribute.
    pub fn position_location(&self) -> u32 {
        self.position_location
    }
}

// ── compile ───────────────────────────────────────────────────────────────

struct CompiledStage {
    stage: ShaderStage,
    module: Module,
}

fn compile(stage: ShaderStage, source: &str) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        log: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage,
            log: e.emit_to_string(source),
        })?;

    Ok(CompiledStage { stage, module })
}

// ── link ──────────────────────────────────────────────────────────────────

/// One entry point input or output slot.
struct Slot<'m> {
    name: Option<&'m str>,
    binding: &'m Binding,
    ty: &'m TypeInner,
}

/// Matches the stages' interfaces. Returns the `a_position` location.
fn link(vertex: &CompiledStage, fragment: &CompiledStage) -> Result<u32, ShaderError> {
    let vs = entry_point(vertex, VERTEX_ENTRY)?;
    let fs = entry_point(fragment, FRAGMENT_ENTRY)?;

    let vs_inputs: Vec<Slot> = vs
        .function
        .arguments
        .iter()
        .flat_map(|a| slots(&vertex.module, a.ty, a.binding.as_ref(), a.name.as_deref()))
        .collect();

    let vs_outputs: Vec<Slot> = vs
        .function
        .result
        .iter()
        .flat_map(|r| slots(&vertex.module, r.ty, r.binding.as_ref(), None))
        .collect();

    let fs_inputs: Vec<Slot> = fs
        .function
        .arguments
        .iter()
        .flat_map(|a| slots(&fragment.module, a.ty, a.binding.as_ref(), a.name.as_deref()))
        .collect();

    let writes_position = vs_outputs
        .iter()
        .any(|s| matches!(s.binding, Binding::BuiltIn(BuiltIn::Position { .. })));
    if !writes_position {
        return Err(link_error(format!(
            "vertex entry point `{VERTEX_ENTRY}` does not write @builtin(position)"
        )));
    }

    for input in fs_inputs.iter() {
        let Some(location) = location_of(input.binding) else { continue };

        let Some(output) = vs_outputs
            .iter()
            .find(|o| location_of(o.binding) == Some(location))
        else {
            return Err(link_error(format!(
                "fragment input {} at @location({location}) is not written by the vertex stage",
                input.name.unwrap_or("<unnamed>")
            )));
        };

        if output.ty != input.ty {
            return Err(link_error(format!(
                "type mismatch at @location({location}): vertex writes {:?}, fragment reads {:?}",
                output.ty, input.ty
            )));
        }
    }

    let fs_outputs: Vec<Slot> = fs
        .function
        .result
        .iter()
        .flat_map(|r| slots(&fragment.module, r.ty, r.binding.as_ref(), None))
        .collect();

    if !fs_outputs.iter().any(|s| location_of(s.binding) == Some(0)) {
        return Err(link_error(format!(
            "fragment entry point `{FRAGMENT_ENTRY}` does not write color target @location(0)"
        )));
    }

    let position = vs_inputs
        .iter()
        .find(|s| s.name == Some(POSITION_ATTRIBUTE) && location_of(s.binding).is_some())
        .ok_or_else(|| {
            link_error(format!(
                "vertex stage has no `{POSITION_ATTRIBUTE}` attribute"
            ))
        })?;

    // The vertex buffer layout is fixed to two f32 per vertex.
    let vec2_f32 = TypeInner::Vector {
        size: VectorSize::Bi,
        scalar: Scalar::F32,
    };
    if *position.ty != vec2_f32 {
        return Err(link_error(format!(
            "`{POSITION_ATTRIBUTE}` must be vec2<f32>, found {:?}",
            position.ty
        )));
    }

    location_of(position.binding).ok_or_else(|| {
        link_error(format!("`{POSITION_ATTRIBUTE}` has no @location"))
    })
}

fn entry_point<'m>(
    compiled: &'m CompiledStage,
    name: &str,
) -> Result<&'m naga::EntryPoint, ShaderError> {
    let expected = compiled.stage.naga();
    compiled
        .module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == expected)
        .ok_or_else(|| {
            link_error(format!(
                "{} stage has no @{} entry point named `{name}`",
                compiled.stage, compiled.stage
            ))
        })
}

/// Flattens an argument or result into its bound slots.
///
/// A bound value is a single slot; an unbound struct contributes its bound members.
fn slots<'m>(
    module: &'m Module,
    ty: Handle<Type>,
    binding: Option<&'m Binding>,
    name: Option<&'m str>,
) -> Vec<Slot<'m>> {
    if let Some(binding) = binding {
        return vec![Slot {
            name,
            binding,
            ty: &module.types[ty].inner,
        }];
    }

    match &module.types[ty].inner {
        TypeInner::Struct { members, .. } => members
            .iter()
            .filter_map(|m| {
                m.binding.as_ref().map(|binding| Slot {
                    name: m.name.as_deref(),
                    binding,
                    ty: &module.types[m.ty].inner,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn location_of(binding: &Binding) -> Option<u32> {
    match binding {
        Binding::Location { location, .. } => Some(*location),
        _ => None,
    }
}

fn link_error(log: String) -> ShaderError {
    ShaderError::Link { log }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSTHROUGH_FS: &str = r#"
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    #[test]
    fn bundled_program_links() {
        let program = ShaderProgram::triangle().expect("bundled shaders must link");
        assert_eq!(program.position_location(), 0);
        assert!(program.vertex_source().contains(VERTEX_ENTRY));
        assert!(program.fragment_source().contains(FRAGMENT_ENTRY));
    }

    #[test]
    fn position_location_is_reflected() {
        let vs = r#"
            @vertex
            fn vs_main(@location(3) a_position: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(a_position, 0.0, 1.0);
            }
        "#;
        let program = ShaderProgram::build(vs, PASSTHROUGH_FS).unwrap();
        assert_eq!(program.position_location(), 3);
    }

    #[test]
    fn syntax_error_is_a_vertex_compile_error() {
        let err = ShaderProgram::build("@vertex fn vs_main( -> {", PASSTHROUGH_FS).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Vertex, .. }), "{err}");
        assert!(!err.log().is_empty());
    }

    #[test]
    fn validation_error_is_a_fragment_compile_error() {
        let fs = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return 1.0;
            }
        "#;
        let err = ShaderProgram::build(TRIANGLE_VERTEX_WGSL, fs).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }), "{err}");
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let vs = r#"
            @vertex
            fn main(@location(0) a_position: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(a_position, 0.0, 1.0);
            }
        "#;
        let err = ShaderProgram::build(vs, PASSTHROUGH_FS).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err}");
        assert!(err.log().contains(VERTEX_ENTRY));
    }

    #[test]
    fn stages_swapped_fails_to_link() {
        let err = ShaderProgram::build(PASSTHROUGH_FS, TRIANGLE_VERTEX_WGSL).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err}");
    }

    #[test]
    fn unwritten_fragment_input_fails_to_link() {
        let fs = r#"
            @fragment
            fn fs_main(@location(1) tint: vec4<f32>) -> @location(0) vec4<f32> {
                return tint;
            }
        "#;
        let err = ShaderProgram::build(TRIANGLE_VERTEX_WGSL, fs).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err}");
        assert!(err.log().contains("@location(1)"));
    }

    #[test]
    fn matching_varyings_link() {
        let vs = r#"
            struct VsOut {
                @builtin(position) pos: vec4<f32>,
                @location(1) tint: vec4<f32>,
            };

            @vertex
            fn vs_main(@location(0) a_position: vec2<f32>) -> VsOut {
                var out: VsOut;
                out.pos = vec4<f32>(a_position, 0.0, 1.0);
                out.tint = vec4<f32>(1.0, 0.0, 0.0, 1.0);
                return out;
            }
        "#;
        let fs = r#"
            @fragment
            fn fs_main(@location(1) tint: vec4<f32>) -> @location(0) vec4<f32> {
                return tint;
            }
        "#;
        assert!(ShaderProgram::build(vs, fs).is_ok());
    }

    #[test]
    fn missing_position_attribute_fails_to_link() {
        let vs = r#"
            @vertex
            fn vs_main(@location(0) pos: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(pos, 0.0, 1.0);
            }
        "#;
        let err = ShaderProgram::build(vs, PASSTHROUGH_FS).unwrap_err();
        assert!(err.log().contains(POSITION_ATTRIBUTE), "{err}");
    }

    #[test]
    fn integer_position_attribute_fails_to_link() {
        let vs = r#"
            @vertex
            fn vs_main(@location(0) a_position: vec2<i32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(vec2<f32>(a_position), 0.0, 1.0);
            }
        "#;
        let err = ShaderProgram::build(vs, PASSTHROUGH_FS).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err}");
        assert!(err.log().contains("vec2<f32>"), "{err}");
    }

    #[test]
    fn fragment_without_color_output_fails_to_link() {
        let fs = r#"
            @fragment
            fn fs_main() {}
        "#;
        let err = ShaderProgram::build(TRIANGLE_VERTEX_WGSL, fs).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }), "{err}");
        assert!(err.log().contains("@location(0)"), "{err}");
    }
}
