//! Tube materials and their surface appearance.

use std::fmt;
use std::str::FromStr;

use crate::error::{OperationError, PipeError};

/// Surface appearance parameters for a physically based renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticalParams {
    /// Base colour as sRGB bytes.
    pub color: [u8; 3],
    /// Metalness in `[0, 1]`.
    pub metalness: f64,
    /// Roughness in `[0, 1]`.
    pub roughness: f64,
}

/// Material a tube is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Material {
    #[default]
    Aluminium,
    Steel,
    Stainless,
}

impl Material {
    /// All materials, in display order.
    pub const ALL: [Material; 3] = [Material::Aluminium, Material::Steel, Material::Stainless];

    /// Appearance of the material.
    #[must_use]
    pub const fn optical(self) -> OpticalParams {
        match self {
            Material::Aluminium => OpticalParams {
                color: [0xd5, 0xd5, 0xd3],
                metalness: 0.95,
                roughness: 0.25,
            },
            Material::Steel => OpticalParams {
                color: [0xc0, 0xc0, 0xc0],
                metalness: 0.925,
                roughness: 0.375,
            },
            Material::Stainless => OpticalParams {
                color: [0xc8, 0xc8, 0xc8],
                metalness: 0.925,
                roughness: 0.375,
            },
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Aluminium => "Aluminium",
            Material::Steel => "Steel",
            Material::Stainless => "Stainless",
        };
        f.write_str(name)
    }
}

impl FromStr for Material {
    type Err = PipeError;

    /// Resolves a product label such as `"304 Stainless Steel"` or
    /// `"6061 Aluminum"`.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let label = label.to_ascii_lowercase();
        // "stainless steel" contains "steel".
        if label.contains("stainless") {
            Ok(Material::Stainless)
        } else if label.contains("steel") {
            Ok(Material::Steel)
        } else if label.contains("aluminum") || label.contains("aluminium") {
            Ok(Material::Aluminium)
        } else {
            Err(OperationError::InvalidInput(format!("unknown material {label:?}")).into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn labels_resolve() {
        assert_eq!("304 Stainless Steel".parse::<Material>().unwrap(), Material::Stainless);
        assert_eq!("Mild STEEL".parse::<Material>().unwrap(), Material::Steel);
        assert_eq!("6061 aluminum".parse::<Material>().unwrap(), Material::Aluminium);
        assert_eq!("Aluminium".parse::<Material>().unwrap(), Material::Aluminium);
        assert!("copper".parse::<Material>().is_err());
    }

    #[test]
    fn optical_params() {
        let al = Material::Aluminium.optical();
        assert_eq!(al.color, [0xd5, 0xd5, 0xd3]);
        assert_relative_eq!(al.metalness, 0.95);
        assert_relative_eq!(Material::Steel.optical().roughness, 0.375);
        assert_ne!(Material::Steel.optical().color, Material::Stainless.optical().color);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for m in Material::ALL {
            assert_eq!(m.to_string().parse::<Material>().unwrap(), m);
        }
    }
}
