#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const SHAPE_DECL: &str = r#"{
  "source": "src/geo/Shape.hx",
  "types": [
    {
      "qualified_name": "geo.Shape",
      "name": {"text": "Shape", "span": {"start": 27, "end": 32, "line": 3}},
      "kind": "interface",
      "members": [
        {
          "name": {"text": "area", "span": {"start": 50, "end": 54, "line": 4}},
          "kind": "method",
          "visibility": "public"
        }
      ]
    }
  ]
}"#;

pub const CIRCLE_DECL: &str = r#"{
  "source": "src/geo/Circle.hx",
  "types": [
    {
      "qualified_name": "geo.Circle",
      "name": {"text": "Circle", "span": {"start": 23, "end": 29, "line": 3}},
      "kind": "class",
      "implements": ["Shape"],
      "members": [
        {
          "name": {"text": "area", "span": {"start": 80, "end": 84, "line": 5}},
          "kind": "method",
          "visibility": "public",
          "modifiers": ["override"]
        },
        {
          "name": {"text": "radius", "span": {"start": 60, "end": 66, "line": 4}},
          "kind": "field"
        }
      ]
    }
  ]
}"#;

pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Shape and Circle declaration files under `root`.
pub fn write_geo_project(root: &Path) {
    write(root, "geo/Shape.decl.json", SHAPE_DECL);
    write(root, "geo/Circle.decl.json", CIRCLE_DECL);
}
