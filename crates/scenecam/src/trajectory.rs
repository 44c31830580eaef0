//! Trajectory smoothing: resampling a camera list along a smooth curve.

use scenecam_core::{CatmullRom, Camera, Result, ScenecamError};

/// Fits smooth curves through an ordered camera list and resamples them
/// uniformly at `step` in the curve parameter.
///
/// Three independent splines interpolate viewpoint positions and the
/// endpoints of the `towards` and `up` vectors. The curve parameter grows by
/// the viewpoint distance plus the `towards` rotation angle between
/// consecutive keypoints, so the resampling slows down through turns.
/// Intrinsics and clip distances come from the first keypoint; labels encode
/// the sample parameter (`T0.300000`).
///
/// # Errors
/// `InsufficientKeypoints` when fewer than two cameras are supplied.
pub fn interpolate_trajectory(cameras: &[Camera], step: f32) -> Result<Vec<Camera>> {
    if cameras.len() < 2 {
        return Err(ScenecamError::InsufficientKeypoints(cameras.len()));
    }
    assert!(step > 0.0, "trajectory step must be positive");
    let first = &cameras[0];

    let mut knots = Vec::with_capacity(cameras.len());
    for (i, camera) in cameras.iter().enumerate() {
        if i == 0 {
            knots.push(0.0f32);
        } else {
            let previous = &cameras[i - 1];
            let distance = camera.origin.distance(previous.origin);
            let turn = camera
                .towards
                .dot(previous.towards)
                .clamp(-1.0, 1.0)
                .acos();
            knots.push(knots[i - 1] + distance + turn);
        }
    }

    let viewpoints = CatmullRom::new(cameras.iter().map(|c| c.origin).collect(), knots.clone());
    let towards = CatmullRom::new(cameras.iter().map(|c| c.towards).collect(), knots.clone());
    let ups = CatmullRom::new(cameras.iter().map(|c| c.up).collect(), knots);

    let mut samples = Vec::new();
    let mut u = viewpoints.start_parameter();
    let end = viewpoints.end_parameter();
    while u <= end + 1e-6 {
        let camera = Camera::new(
            viewpoints.position(u),
            towards.position(u),
            ups.position(u),
            first.xfov,
            first.yfov,
            first.near,
            first.far,
        )
        .with_label(format!("T{u:.6}"));
        samples.push(camera);
        u += step;
    }
    Ok(samples)
}
