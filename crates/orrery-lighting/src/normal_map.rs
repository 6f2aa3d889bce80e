//! Tangent-space normal mapping without per-vertex tangents.
//!
//! The tangent frame is rebuilt per fragment from screen-space derivatives of
//! the camera-space position and the texture coordinate. The CPU functions in
//! this module mirror the fragment shader step for step so the math can be
//! checked without a GPU.

use glam::{Vec2, Vec3};
use orrery_render::SHARED_BINDINGS_SOURCE;

const VARYINGS: &str = r#"
struct NormalMapVarying {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) position_view: vec3<f32>,
    @location(1) uv: vec2<f32>,
};
"#;

const VERTEX_BODY: &str = r#"
@vertex
fn vs_main(in: VertexInput) -> NormalMapVarying {
    let position_view = frame.view * draw.model * vec4<f32>(in.position, 1.0);
    var out: NormalMapVarying;
    out.clip_position = frame.projection * position_view;
    out.position_view = position_view.xyz;
    out.uv = in.uv;
    return out;
}
"#;

// Sphere UVs run top-down; flip v so the bitangent points along the
// normal map's +Y (green) axis.
const FRAGMENT_BODY: &str = r#"
@fragment
fn fs_main(in: NormalMapVarying) -> @location(0) vec4<f32> {
    let base = textureSample(diffuse_texture, diffuse_sampler, in.uv);
    let texel = textureSample(normal_texture, normal_sampler, in.uv).rgb;

    let uv = vec2<f32>(in.uv.x, 1.0 - in.uv.y);
    let dp1 = dpdx(in.position_view);
    let dp2 = -dpdy(in.position_view);
    let duv1 = dpdx(uv);
    let duv2 = -dpdy(uv);

    let t = normalize(dp1 * duv2.y - dp2 * duv1.y);
    let b = normalize(-dp1 * duv2.x + dp2 * duv1.x);
    let n_geo = normalize(cross(dp1, dp2));
    let n = normalize(mat3x3<f32>(t, b, n_geo) * (texel * 2.0 - 1.0));

    let l = normalize(frame.light.xyz - in.position_view);
    let diffuse = max(dot(n, l), 0.0);
    let rgb = base.rgb * frame.light.w + base.rgb * diffuse;
    return vec4<f32>(rgb, base.a);
}
"#;

/// Complete WGSL for the vertex stage.
pub fn vertex_source() -> String {
    format!("{SHARED_BINDINGS_SOURCE}{VARYINGS}{VERTEX_BODY}")
}

/// Complete WGSL for the fragment stage.
pub fn fragment_source() -> String {
    format!("{SHARED_BINDINGS_SOURCE}{VARYINGS}{FRAGMENT_BODY}")
}

/// Map a texel from `[0, 1]` to a tangent-space direction in `[-1, 1]`.
pub fn decode_normal(texel: Vec3) -> Vec3 {
    texel * 2.0 - Vec3::ONE
}

/// Tangent, bitangent and geometric normal for one fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
}

impl TangentFrame {
    /// Build the frame from position and UV differences along two screen
    /// axes. `dp2`/`duv2` follow the upward screen axis.
    pub fn from_derivatives(dp1: Vec3, dp2: Vec3, duv1: Vec2, duv2: Vec2) -> Self {
        Self {
            tangent: (dp1 * duv2.y - dp2 * duv1.y).normalize_or_zero(),
            bitangent: (-dp1 * duv2.x + dp2 * duv1.x).normalize_or_zero(),
            normal: dp1.cross(dp2).normalize_or_zero(),
        }
    }

    /// Rotate a decoded tangent-space normal into the frame's space.
    pub fn to_view(&self, tangent_normal: Vec3) -> Vec3 {
        (self.tangent * tangent_normal.x
            + self.bitangent * tangent_normal.y
            + self.normal * tangent_normal.z)
            .normalize_or_zero()
    }
}

/// `ambient·base + base·max(N·L, 0)`, with `L` pointing from the surface
/// point to the light.
pub fn shade(
    base: Vec3,
    normal: Vec3,
    position_view: Vec3,
    light_view: Vec3,
    ambient: f32,
) -> Vec3 {
    let to_light = (light_view - position_view).normalize_or_zero();
    let diffuse = normal.dot(to_light).max(0.0);
    base * ambient + base * diffuse
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn plane_frame() -> TangentFrame {
        TangentFrame::from_derivatives(Vec3::X, Vec3::Y, Vec2::X, Vec2::Y)
    }

    #[test]
    fn test_plane_frame_is_axis_aligned() {
        let frame = plane_frame();
        assert!((frame.tangent - Vec3::X).length() < EPS);
        assert!((frame.bitangent - Vec3::Y).length() < EPS);
        assert!((frame.normal - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_derivative_scale_does_not_matter() {
        let frame = TangentFrame::from_derivatives(
            Vec3::X * 0.01,
            Vec3::Y * 0.01,
            Vec2::X * 0.002,
            Vec2::Y * 0.002,
        );
        assert!((frame.tangent - Vec3::X).length() < EPS);
        assert!((frame.bitangent - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_decode_normal() {
        let flat = decode_normal(Vec3::new(0.5, 0.5, 1.0));
        assert!((flat - Vec3::Z).length() < EPS);
        let right = decode_normal(Vec3::new(1.0, 0.5, 0.5));
        assert!((right - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_flat_texel_keeps_geometric_normal() {
        let frame = TangentFrame::from_derivatives(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            Vec2::X,
            Vec2::Y,
        );
        let n = frame.to_view(decode_normal(Vec3::new(0.5, 0.5, 1.0)));
        assert!((n - frame.normal).length() < EPS);
    }

    #[test]
    fn test_tilted_texel_leans_toward_tangent() {
        let frame = plane_frame();
        let n = frame.to_view(Vec3::new(1.0, 0.0, 1.0));
        assert!(n.x > 0.7 && n.z > 0.7);
        assert!((n.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_shade_facing_light() {
        let base = Vec3::new(0.2, 0.4, 0.8);
        let lit = shade(base, Vec3::Z, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.05);
        assert!((lit - base * 1.05).length() < EPS);
    }

    #[test]
    fn test_shade_facing_away_keeps_ambient() {
        let base = Vec3::ONE;
        let lit = shade(base, Vec3::Z, Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), 0.05);
        assert!((lit - Vec3::splat(0.05)).length() < EPS);
    }

    #[test]
    fn test_shade_is_monotonic_in_angle() {
        let base = Vec3::ONE;
        let light = Vec3::new(0.0, 0.0, 10.0);
        let head_on = shade(base, Vec3::Z, Vec3::ZERO, light, 0.0);
        let grazing = shade(base, Vec3::new(1.0, 0.0, 1.0).normalize(), Vec3::ZERO, light, 0.0);
        assert!(grazing.x < head_on.x);
        assert!(grazing.x > 0.0);
    }

    #[test]
    fn test_sources_declare_entry_points() {
        let vs = vertex_source();
        let fs = fragment_source();
        assert!(vs.contains("fn vs_main"));
        assert!(fs.contains("fn fs_main"));
        assert!(fs.contains("dpdx"));
        assert!(fs.contains("normal_texture"));
    }
}
