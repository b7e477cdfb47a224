//! End-to-end coverage scenarios for the public raster API
//!
//! These pin down exact pixel sets for representative shapes and check the
//! cross-module properties (edge traces vs. triangle output, mapping at the
//! canvas boundary, weights for every covered pixel).

use raster_core::logging::{LogCategory, LogConfig, LogLevel};
use raster_core::types::{BufferPoint, NormalizedVertex, PixelList};
use raster_core::{BoundsPolicy, DuplicatePolicy, NdcEdgePolicy, RasterConfig, Rasterizer};
use std::collections::BTreeSet;

fn set(pixels: &[BufferPoint]) -> BTreeSet<BufferPoint> {
    pixels.iter().copied().collect()
}

fn edge_traces(raster: &Rasterizer, t: (i32, i32, i32, i32, i32, i32)) -> PixelList {
    let (x1, y1, x2, y2, x3, y3) = t;
    [
        raster.raster_line(x1, y1, x2, y2, true),
        raster.raster_line(x2, y2, x3, y3, true),
        raster.raster_line(x3, y3, x1, y1, true),
    ]
    .concat()
}

#[test]
fn right_triangle_on_10x10_canvas() {
    let raster = Rasterizer::new(10, 10).unwrap();
    let pixels = raster.raster_triangle(1, 1, 8, 1, 1, 8);

    let outline = set(&edge_traces(&raster, (1, 1, 8, 1, 1, 8)));
    let mut expected = outline.clone();
    for y in 0..10 {
        for x in 0..10 {
            if x > 1 && y > 1 && x + y < 9 {
                expected.insert(BufferPoint::new(x, y));
            }
        }
    }

    assert_eq!(set(&pixels), expected);
    // The traced outline is a closed right angle: all three corners present
    for corner in [(1, 1), (8, 1), (1, 8)] {
        assert!(outline.contains(&BufferPoint::from(corner)));
    }
}

#[test]
fn triangle_output_starts_with_its_edge_traces() {
    let raster = Rasterizer::new(64, 48).unwrap();
    for t in [
        (3, 4, 60, 10, 20, 45),
        (60, 2, 1, 1, 30, 40),
        (10, 10, 11, 40, 12, 10),
        (0, 47, 63, 47, 32, 0),
    ] {
        let pixels = raster.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5);
        let edges = edge_traces(&raster, t);
        assert!(pixels.len() >= edges.len());
        assert_eq!(&pixels[..edges.len()], edges.as_slice());

        let (min_x, max_x) = (t.0.min(t.2).min(t.4), t.0.max(t.2).max(t.4));
        let (min_y, max_y) = (t.1.min(t.3).min(t.5), t.1.max(t.3).max(t.5));
        for p in &pixels {
            assert!((min_x..=max_x).contains(&p.x) && (min_y..=max_y).contains(&p.y));
        }
    }
}

#[test]
fn collinear_triangle_equals_edge_union() {
    let raster = Rasterizer::new(32, 32).unwrap();
    for t in [(2, 2, 20, 8, 11, 5), (5, 1, 5, 30, 5, 12), (0, 9, 31, 9, 4, 9)] {
        let pixels = raster.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5);
        assert_eq!(pixels, edge_traces(&raster, t));
    }
}

#[test]
fn shared_vertices_are_traced_once() {
    let raster = Rasterizer::new(32, 32).unwrap();
    let edges = edge_traces(&raster, (4, 4, 27, 6, 9, 25));
    for vertex in [(4, 4), (27, 6), (9, 25)] {
        let hits = edges
            .iter()
            .filter(|&&p| p == BufferPoint::from(vertex))
            .count();
        assert_eq!(hits, 1, "vertex {:?}", vertex);
    }
}

#[test]
fn ndc_corners_map_to_canvas_extent() {
    let raster = Rasterizer::new(10, 10).unwrap();
    let mapper = raster.mapper();
    assert_eq!(mapper.map(NormalizedVertex::new(-1.0, -1.0)), (0.0, 0.0));
    assert_eq!(mapper.map(NormalizedVertex::new(1.0, 1.0)), (10.0, 10.0));
    assert_eq!(
        mapper.to_buffer_point(NormalizedVertex::new(1.0, 1.0)),
        BufferPoint::new(10, 10)
    );

    let clamped = Rasterizer::with_config(
        10,
        10,
        RasterConfig {
            ndc_edge: NdcEdgePolicy::ClampToLastPixel,
            ..RasterConfig::default()
        },
    )
    .unwrap();
    assert_eq!(
        clamped
            .mapper()
            .to_buffer_point(NormalizedVertex::new(1.0, 1.0)),
        BufferPoint::new(9, 9)
    );
}

#[test]
fn full_screen_ndc_triangle_stays_on_canvas() {
    let raster = Rasterizer::new(16, 16).unwrap();
    let pixels = raster.raster_triangle_ndc(
        NormalizedVertex::new(-1.0, -1.0),
        NormalizedVertex::new(1.0, -1.0),
        NormalizedVertex::new(-1.0, 1.0),
    );
    assert!(!pixels.is_empty());
    assert!(pixels.iter().all(|p| p.x < 16 && p.y < 16));
}

#[test]
fn bounds_policies_differ_only_off_canvas() {
    let make = |bounds| {
        Rasterizer::with_config(
            12,
            12,
            RasterConfig {
                bounds,
                ..RasterConfig::default()
            },
        )
        .unwrap()
    };
    let upper_only = make(BoundsPolicy::UpperOnly);
    let stop = make(BoundsPolicy::Stop);
    let discard = make(BoundsPolicy::Discard);

    // Fully on canvas: identical
    let t = (1, 1, 10, 3, 4, 10);
    let reference = upper_only.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5);
    assert_eq!(stop.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5), reference);
    assert_eq!(discard.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5), reference);

    // Hanging off the top-left: only the upper-only policy emits negatives
    let t = (-4, -3, 9, 2, 2, 9);
    let low = upper_only.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5);
    assert!(low.iter().any(|p| p.x < 0 || p.y < 0));
    for pixels in [
        stop.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5),
        discard.raster_triangle(t.0, t.1, t.2, t.3, t.4, t.5),
    ] {
        assert!(pixels.iter().all(|p| p.x >= 0 && p.y >= 0));
    }
}

#[test]
fn unique_policy_removes_every_repeat() {
    let raster = Rasterizer::with_config(
        10,
        10,
        RasterConfig {
            duplicates: DuplicatePolicy::Unique,
            ..RasterConfig::default()
        },
    )
    .unwrap();
    let pixels = raster.raster_triangle(1, 1, 8, 1, 1, 8);
    assert_eq!(pixels.len(), 36);
    assert_eq!(set(&pixels).len(), pixels.len());
}

#[test]
fn weights_cover_every_pixel_of_a_triangle() {
    let raster = Rasterizer::new(10, 10).unwrap();
    let (p1, p2, p3) = (
        BufferPoint::new(1, 1),
        BufferPoint::new(8, 1),
        BufferPoint::new(1, 8),
    );
    let pixels = raster.raster_triangle(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
    let weights = raster.vertex_contributions(p1, p2, p3, &pixels);
    assert_eq!(weights.len(), pixels.len());
    for (p, w) in pixels.iter().zip(&weights) {
        assert!((w.sum() - 1.0).abs() < 1e-5, "{:?} -> {:?}", p, w);
        // Moving right increases the second vertex's share
        if p.x > 1 && p.x + p.y < 8 {
            let right = raster.vertex_contributions(p1, p2, p3, &[BufferPoint::new(p.x + 1, p.y)]);
            assert!(right[0].w2 > w.w2);
        }
    }
}

#[test]
fn rasterizer_shared_across_threads() {
    let raster = Rasterizer::new(64, 64).unwrap();
    let reference = raster.raster_triangle(2, 2, 60, 10, 20, 61);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| raster.raster_triangle(2, 2, 60, 10, 20, 61)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}

#[test]
fn logging_enabled_during_degenerate_draws() {
    // Enabling verbose categories must not change raster output
    let config = LogConfig::global();
    config.set_level(LogCategory::Triangle, LogLevel::Trace);
    config.set_level(LogCategory::Contribution, LogLevel::Debug);

    let raster = Rasterizer::new(10, 10).unwrap();
    let pixels = raster.raster_triangle(0, 0, 4, 4, 2, 2);
    assert_eq!(pixels, edge_traces(&raster, (0, 0, 4, 4, 2, 2)));
    let weights = raster.vertex_contributions(
        BufferPoint::new(0, 0),
        BufferPoint::new(4, 4),
        BufferPoint::new(2, 2),
        &pixels,
    );
    assert_eq!(weights.len(), pixels.len());

    config.set_level(LogCategory::Triangle, LogLevel::Off);
    config.set_level(LogCategory::Contribution, LogLevel::Off);
}
