//! Off-screen scene targets.
//!
//! The main pass writes three parallel targets (color, view-space normals,
//! linear depth) that the post-process pass then samples. They always match
//! the back-buffer resolution and are rebuilt on resize.

use toon_rhi::{
    Format, GraphicsDevice, RenderTargetView, RhiResult, ShaderResourceView, TextureDesc,
};
use tracing::debug;

/// A color texture viewed both as a render target and as a shader input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub rtv: RenderTargetView,
    pub srv: ShaderResourceView,
}

impl RenderTarget {
    /// Create the texture and both views, then drop the texture reference.
    pub fn create(
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        format: Format,
    ) -> RhiResult<Self> {
        let texture = device.create_texture(&TextureDesc::render_target(width, height, format))?;

        let target = match device.create_render_target_view(texture) {
            Ok(rtv) => match device.create_shader_resource_view(texture, format) {
                Ok(srv) => Ok(Self { rtv, srv }),
                Err(e) => {
                    device.release_render_target_view(rtv);
                    Err(e)
                }
            },
            Err(e) => Err(e),
        };
        // The views keep the texture alive
        device.release_texture(texture);
        target
    }

    /// Release both views.
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        device.release_render_target_view(self.rtv);
        device.release_shader_resource_view(self.srv);
    }
}

/// The main pass's multi-target buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTargets {
    pub color: RenderTarget,
    pub normals: RenderTarget,
    pub depth: RenderTarget,
    width: u32,
    height: u32,
}

impl SceneTargets {
    pub const COLOR_FORMAT: Format = Format::Rgba8Unorm;
    pub const NORMALS_FORMAT: Format = Format::Rgba16Float;
    pub const DEPTH_FORMAT: Format = Format::R32Float;

    /// Create all three targets at `width x height`.
    ///
    /// # Errors
    ///
    /// Fails if any texture or view cannot be created. Targets created
    /// before the failure are released.
    pub fn create(device: &mut dyn GraphicsDevice, width: u32, height: u32) -> RhiResult<Self> {
        let mut created = Vec::with_capacity(3);
        for format in [Self::COLOR_FORMAT, Self::NORMALS_FORMAT, Self::DEPTH_FORMAT] {
            match RenderTarget::create(device, width, height, format) {
                Ok(target) => created.push(target),
                Err(e) => {
                    for target in created {
                        target.release(device);
                    }
                    return Err(e);
                }
            }
        }
        let [color, normals, depth] = [created[0], created[1], created[2]];

        debug!("Scene targets created ({}x{})", width, height);
        Ok(Self {
            color,
            normals,
            depth,
            width,
            height,
        })
    }

    /// Render target views in shader output order.
    pub fn render_target_views(&self) -> [RenderTargetView; 3] {
        [self.color.rtv, self.normals.rtv, self.depth.rtv]
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Release every view. The targets must not be bound afterwards.
    pub fn release(self, device: &mut dyn GraphicsDevice) {
        for target in [self.color, self.normals, self.depth] {
            target.release(device);
        }
        debug!("Scene targets released ({}x{})", self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toon_rhi::{RecordingDevice, ResourceKind};

    #[test]
    fn test_create_formats_and_release() {
        let mut device = RecordingDevice::new(320, 240);
        let targets = SceneTargets::create(&mut device, 320, 240).unwrap();

        assert_eq!(targets.size(), (320, 240));
        // Only the views remain
        assert_eq!(device.live_texture_count(), 0);

        let views = targets.render_target_views();
        assert_eq!(views[0], targets.color.rtv);
        assert_eq!(views[2], targets.depth.rtv);
        assert_ne!(views[0], views[1]);
    }

    #[test]
    fn test_view_failure_releases_texture() {
        let mut device = RecordingDevice::new(320, 240);
        device.fail_after(ResourceKind::View, 3);

        let result = SceneTargets::create(&mut device, 320, 240);
        assert!(result.is_err());
        assert_eq!(device.live_texture_count(), 0);
        // Color views and the normals render target view are given back
        assert_eq!(device.live_view_count(), 0);
    }

    #[test]
    fn test_release_returns_all_views() {
        let mut device = RecordingDevice::new(320, 240);
        let targets = SceneTargets::create(&mut device, 320, 240).unwrap();
        assert_eq!(device.live_view_count(), 6);

        targets.release(&mut device);
        assert_eq!(device.live_view_count(), 0);
    }
}
