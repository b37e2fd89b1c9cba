//! Shader descriptors.
//!
//! Bytecode loading and reflection live outside this crate. A shader is
//! described by its name, its stage and the parameter names its reflection
//! exposes; binding an undeclared name is a silent no-op.

/// Shader stage a shader runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Pixel (fragment) shader
    Pixel,
}

/// Description of a compiled shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
    /// Debug name, usually the bytecode file stem.
    pub name: String,
    pub stage: ShaderStage,
    /// Parameter names exposed by reflection.
    pub parameters: Vec<String>,
}

impl ShaderDesc {
    /// Create a description with no declared parameters.
    pub fn new(name: impl Into<String>, stage: ShaderStage) -> Self {
        Self {
            name: name.into(),
            stage,
            parameters: Vec::new(),
        }
    }

    /// Declare the parameter names the shader exposes.
    pub fn with_parameters(mut self, names: &[&str]) -> Self {
        self.parameters = names.iter().map(|name| (*name).to_string()).collect();
        self
    }

    /// Whether `name` is a declared parameter.
    pub fn declares(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares() {
        let desc = ShaderDesc::new("ShadowVS", ShaderStage::Vertex)
            .with_parameters(&["world", "view", "projection"]);

        assert!(desc.declares("world"));
        assert!(!desc.declares("World"));
        assert_eq!(desc.stage, ShaderStage::Vertex);
    }
}
