//! Opaque resource handles.
//!
//! Handles are plain copyable ids issued by a [`GraphicsDevice`](crate::GraphicsDevice).
//! They carry no lifetime; the device that issued a handle owns the resource.

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw device id.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// The raw device id.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_handle!(
    /// A 2D texture (or texture array) resource.
    TextureHandle
);
define_handle!(
    /// A view that lets shaders sample a texture.
    ShaderResourceView
);
define_handle!(
    /// A view that lets the output merger write color into a texture.
    RenderTargetView
);
define_handle!(
    /// A view that lets the output merger write depth into a texture.
    DepthStencilView
);
define_handle!(
    /// Immutable sampler state.
    SamplerState
);
define_handle!(
    /// Immutable rasterizer state.
    RasterizerState
);
define_handle!(
    /// Immutable depth-stencil state.
    DepthStencilState
);
define_handle!(
    /// Vertex or index buffer.
    BufferHandle
);
define_handle!(
    /// A compiled shader for one stage.
    ShaderHandle
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        let handle = TextureHandle::from_raw(42);
        assert_eq!(handle.raw(), 42);
        assert_eq!(handle, TextureHandle::from_raw(42));
        assert_ne!(handle, TextureHandle::from_raw(43));
    }
}
