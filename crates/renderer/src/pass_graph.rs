//! Ordered frame pass list.
//!
//! Each pass declares the resources it reads and writes and whether its
//! outputs are cleared or loaded. The renderer walks the list in order,
//! skips a pass whose reads were not written earlier in the frame, and
//! clears the writes of passes marked [`LoadOp::Clear`].
//! [`PassGraph::validate`] checks that every read has an earlier producer.

use std::fmt;

use crate::error::{RendererError, RendererResult};

/// The passes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    Shadow,
    Geometry,
    Sky,
    PostProcess,
    Overlay,
    Present,
}

impl PassKind {
    /// Debug-event label of the pass.
    pub fn label(self) -> &'static str {
        match self {
            PassKind::Shadow => "Shadow",
            PassKind::Geometry => "Geometry",
            PassKind::Sky => "Sky",
            PassKind::PostProcess => "PostProcess",
            PassKind::Overlay => "Overlay",
            PassKind::Present => "Present",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resources passed between frame passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameResource {
    ShadowMap,
    SceneColor,
    SceneNormals,
    SceneDepth,
    DepthBuffer,
    BackBuffer,
}

impl FrameResource {
    /// Resources that may be read without a producer this frame.
    ///
    /// The shadow map keeps its previous content while shadows are off;
    /// the shader is told to ignore it.
    pub fn is_optional_external(self) -> bool {
        matches!(self, FrameResource::ShadowMap)
    }
}

/// What happens to a pass's outputs once they are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOp {
    Clear,
    Load,
}

/// One pass with its resource dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRecord {
    pub pass: PassKind,
    pub reads: Vec<FrameResource>,
    pub writes: Vec<FrameResource>,
    pub load: LoadOp,
}

impl PassRecord {
    pub fn new(
        pass: PassKind,
        reads: &[FrameResource],
        writes: &[FrameResource],
        load: LoadOp,
    ) -> Self {
        Self {
            pass,
            reads: reads.to_vec(),
            writes: writes.to_vec(),
            load,
        }
    }
}

/// Validated, ordered list of passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassGraph {
    passes: Vec<PassRecord>,
}

impl PassGraph {
    /// Build a graph, rejecting orders that read before writing.
    pub fn new(passes: Vec<PassRecord>) -> RendererResult<Self> {
        let graph = Self { passes };
        graph.validate()?;
        Ok(graph)
    }

    /// The frame order: shadow, geometry, sky, post-process, overlay,
    /// present.
    pub fn frame() -> Self {
        use FrameResource::*;

        let scene = [SceneColor, SceneNormals, SceneDepth, DepthBuffer];
        Self {
            passes: vec![
                PassRecord::new(PassKind::Shadow, &[], &[ShadowMap], LoadOp::Clear),
                PassRecord::new(PassKind::Geometry, &[ShadowMap], &scene, LoadOp::Clear),
                PassRecord::new(PassKind::Sky, &scene, &scene, LoadOp::Load),
                PassRecord::new(
                    PassKind::PostProcess,
                    &[SceneColor, SceneNormals, SceneDepth],
                    &[BackBuffer],
                    LoadOp::Clear,
                ),
                PassRecord::new(PassKind::Overlay, &[], &[BackBuffer], LoadOp::Load),
                PassRecord::new(PassKind::Present, &[BackBuffer], &[], LoadOp::Load),
            ],
        }
    }

    /// Check pass uniqueness and that every read resource is written by an
    /// earlier pass or is optional-external.
    pub fn validate(&self) -> RendererResult<()> {
        let mut written: Vec<FrameResource> = Vec::new();

        for (index, record) in self.passes.iter().enumerate() {
            if self.passes[..index].iter().any(|p| p.pass == record.pass) {
                return Err(RendererError::InvalidPassGraph(format!(
                    "{} appears twice",
                    record.pass
                )));
            }

            for read in &record.reads {
                if !written.contains(read) && !read.is_optional_external() {
                    return Err(RendererError::InvalidPassGraph(format!(
                        "{} reads {:?} before any pass writes it",
                        record.pass, read
                    )));
                }
            }
            written.extend(record.writes.iter().copied());
        }
        Ok(())
    }

    pub fn passes(&self) -> &[PassRecord] {
        &self.passes
    }

    /// Pass kinds in execution order.
    pub fn order(&self) -> Vec<PassKind> {
        self.passes.iter().map(|p| p.pass).collect()
    }

    /// Position of `pass` in the order.
    pub fn position(&self, pass: PassKind) -> Option<usize> {
        self.passes.iter().position(|p| p.pass == pass)
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassGraph {
    fn default() -> Self {
        Self::frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_order_is_valid() {
        let graph = PassGraph::frame();
        assert!(graph.validate().is_ok());
        assert_eq!(
            graph.order(),
            vec![
                PassKind::Shadow,
                PassKind::Geometry,
                PassKind::Sky,
                PassKind::PostProcess,
                PassKind::Overlay,
                PassKind::Present,
            ]
        );
    }

    #[test]
    fn test_geometry_without_shadow_pass() {
        // Shadow map is optional-external
        let passes = PassGraph::frame()
            .passes()
            .iter()
            .filter(|p| p.pass != PassKind::Shadow)
            .cloned()
            .collect();
        assert!(PassGraph::new(passes).is_ok());
    }

    #[test]
    fn test_post_process_before_geometry_is_rejected() {
        let mut passes = PassGraph::frame().passes().to_vec();
        passes.swap(1, 3);
        let result = PassGraph::new(passes);
        assert!(matches!(result, Err(RendererError::InvalidPassGraph(_))));
    }

    #[test]
    fn test_duplicate_pass_is_rejected() {
        let mut passes = PassGraph::frame().passes().to_vec();
        passes.push(passes[4].clone());
        assert!(matches!(
            PassGraph::new(passes),
            Err(RendererError::InvalidPassGraph(_))
        ));
    }

    #[test]
    fn test_position() {
        let graph = PassGraph::frame();
        assert!(graph.position(PassKind::Shadow) < graph.position(PassKind::Geometry));
        assert!(graph.position(PassKind::PostProcess) < graph.position(PassKind::Present));
        assert_eq!(graph.len(), 6);
    }
}
