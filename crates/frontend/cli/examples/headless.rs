use raster_core::types::{BufferPoint, NormalizedVertex};
use raster_core::Rasterizer;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let shape = args.get(1).map(|s| s.as_str()).unwrap_or("triangle");

    let raster = match Rasterizer::new(10, 10) {
        Ok(raster) => raster,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let pixels = match shape {
        "triangle" => raster.raster_triangle(1, 1, 8, 1, 1, 8),
        "line" => raster.raster_line(0, 0, 9, 4, false),
        "ndc" => raster.raster_triangle_ndc(
            NormalizedVertex::new(-1.0, -1.0),
            NormalizedVertex::new(1.0, -1.0),
            NormalizedVertex::new(0.0, 1.0),
        ),
        other => {
            eprintln!("Unknown shape: {}", other);
            return;
        }
    };

    let mut rows = vec![vec!['.'; 10]; 10];
    for &BufferPoint { x, y } in &pixels {
        if (0..10).contains(&x) && (0..10).contains(&y) {
            rows[y as usize][x as usize] = '#';
        }
    }
    println!("Headless {}: {} pixel(s)", shape, pixels.len());
    for row in rows {
        println!("{}", row.into_iter().collect::<String>());
    }
    match serde_json::to_string(&pixels) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{}", e),
    }
}
