//! Lazy rebinding of the active font variant.

use sigil_render::{GpuBackend, TextureSampling};

use crate::{
    font::{FontPair, FontVariant, VariantKind},
    shader::FontUniforms,
};

/// Tracks which variant's atlas the shader samples during one pass.
///
/// Texture and texel-size updates happen only on a transition, never per
/// glyph. The uniform caches underneath skip anything already current.
#[derive(Debug, Default)]
pub struct VariantSwitcher {
    active: VariantKind,
}

impl VariantSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> VariantKind {
        self.active
    }

    /// Make `kind` the sampled variant, pushing its atlas through the
    /// uniform caches even if it is already tracked as active.
    ///
    /// Used at pass start, when a previous pass may have left the sampler
    /// pointing at another atlas.
    pub fn sync(&mut self, kind: VariantKind, fonts: &FontPair, uniforms: &mut FontUniforms, backend: &dyn GpuBackend) {
        self.active = kind;
        Self::bind(fonts.variant(kind), uniforms, backend);
    }

    /// Switch to `kind`. Returns `false` without touching the GPU when it is
    /// already active.
    pub fn activate(
        &mut self,
        kind: VariantKind,
        fonts: &FontPair,
        uniforms: &mut FontUniforms,
        backend: &dyn GpuBackend,
    ) -> bool {
        if kind == self.active {
            return false;
        }

        tracing::trace!("switching font variant {:?} -> {:?}", self.active, kind);
        self.active = kind;
        Self::bind(fonts.variant(kind), uniforms, backend);
        true
    }

    /// End of pass: the regular variant is active again.
    pub fn finish(&mut self) {
        self.active = VariantKind::Regular;
    }

    fn bind(variant: &FontVariant, uniforms: &mut FontUniforms, backend: &dyn GpuBackend) {
        uniforms
            .msdf
            .set_texture(backend, variant.texture(), &TextureSampling::SDF);
        uniforms.sdf_texel.set(backend, variant.texel_size());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sigil_render::{CompiledProgram, ProgramId, TextureId};
    use sigil_test_utils::MockGpu;

    use super::*;
    use crate::shader::FontShaders;

    fn pair() -> FontPair {
        let regular = FontVariant::builder(TextureId(1))
            .atlas_size(256.0, 256.0)
            .build()
            .unwrap();
        let bold = FontVariant::builder(TextureId(2))
            .atlas_size(512.0, 256.0)
            .build()
            .unwrap();
        FontPair::new(Arc::new(regular)).with_bold(Arc::new(bold))
    }

    #[test]
    fn test_switches_only_on_transition() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = FontShaders::new();
        shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));
        let (program, uniforms) = shaders.shader_mut().unwrap().parts_mut().unwrap();
        let backend = program.backend();
        let fonts = pair();
        let mut switcher = VariantSwitcher::new();

        switcher.sync(VariantKind::Regular, &fonts, uniforms, backend);
        gpu.clear_calls();

        assert!(!switcher.activate(VariantKind::Regular, &fonts, uniforms, backend));
        assert_eq!(gpu.call_count(), 0);

        assert!(switcher.activate(VariantKind::Bold, &fonts, uniforms, backend));
        assert!(!switcher.activate(VariantKind::Bold, &fonts, uniforms, backend));
        assert_eq!(gpu.count_sampling_changes(), 1);
        assert_eq!(uniforms.msdf.texture(), Some(TextureId(2)));
        assert_eq!(uniforms.sdf_texel.value(), glam::Vec2::new(1.0 / 512.0, 1.0 / 256.0));

        switcher.finish();
        assert_eq!(switcher.active(), VariantKind::Regular);
    }

    #[test]
    fn test_sync_corrects_stale_sampler() {
        let gpu = Arc::new(MockGpu::new());
        let mut shaders = FontShaders::new();
        shaders.initialize(gpu.clone(), CompiledProgram::new(ProgramId(1)));
        let (program, uniforms) = shaders.shader_mut().unwrap().parts_mut().unwrap();
        let backend = program.backend();
        let fonts = pair();

        let mut first = VariantSwitcher::new();
        first.sync(VariantKind::Regular, &fonts, uniforms, backend);
        first.activate(VariantKind::Bold, &fonts, uniforms, backend);
        first.finish();

        let mut second = VariantSwitcher::new();
        second.sync(VariantKind::Regular, &fonts, uniforms, backend);
        assert_eq!(uniforms.msdf.texture(), Some(TextureId(1)));
        assert_eq!(uniforms.sdf_texel.value(), glam::Vec2::new(1.0 / 256.0, 1.0 / 256.0));
    }
}
