//! Enumerated attribute values.

use thiserror::Error;

/// An attribute value that is not one of the allowed spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Defines an enum whose variants map one to one onto XML attribute values.
/// The first variant is the default.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident => $first_str:literal
            $(, $variant:ident => $str:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            #[default]
            #[serde(rename = $first_str)]
            $first,
            $(
                #[serde(rename = $str)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$variant)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => $first_str,
                    $($name::$variant => $str,)*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $first_str => Ok($name::$first),
                    $($str => Ok($name::$variant),)*
                    _ => Err(ParseEnumError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// What a fit mapping's target describes.
    MappingType {
        Time => "time",
        ExperimentalCondition => "experimentalCondition",
        Observable => "observable",
    }
}

string_enum! {
    AxisType {
        Linear => "linear",
        Log10 => "log10",
    }
}

string_enum! {
    LineType {
        None => "none",
        Solid => "solid",
        Dash => "dash",
        Dot => "dot",
        DashDot => "dashDot",
        DashDotDot => "dashDotDot",
    }
}

string_enum! {
    MarkerType {
        None => "none",
        Square => "square",
        Circle => "circle",
        Diamond => "diamond",
        XCross => "xCross",
        Plus => "plus",
        Star => "star",
        TriangleUp => "triangleUp",
        TriangleDown => "triangleDown",
        TriangleLeft => "triangleLeft",
        TriangleRight => "triangleRight",
        HDash => "hDash",
        VDash => "vDash",
    }
}

string_enum! {
    CurveType {
        Points => "points",
        Bar => "bar",
        BarStacked => "barStacked",
        HorizontalBar => "horizontalBar",
        HorizontalBarStacked => "horizontalBarStacked",
    }
}

string_enum! {
    SurfaceType {
        ParametricCurve => "parametricCurve",
        SurfaceMesh => "surfaceMesh",
        SurfaceContour => "surfaceContour",
        Contour => "contour",
        HeatMap => "heatMap",
        StackedCurves => "stackedCurves",
        Bar => "bar",
    }
}

string_enum! {
    /// Whether a fit experiment describes a steady state or a time course.
    ExperimentType {
        SteadyState => "steadyState",
        TimeCourse => "timeCourse",
    }
}

string_enum! {
    /// Scale on which an adjustable parameter's bounds are searched.
    ScaleType {
        Linear => "linear",
        Log => "log",
        Log10 => "log10",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_spellings() {
        for marker in MarkerType::ALL {
            assert_eq!(marker.as_str().parse::<MarkerType>().unwrap(), *marker);
        }
        for surface in SurfaceType::ALL {
            assert_eq!(surface.to_string().parse::<SurfaceType>().unwrap(), *surface);
        }
    }

    #[test]
    fn test_invalid_value() {
        let err = "dashed".parse::<LineType>().unwrap_err();
        assert_eq!(err.kind, "LineType");
        assert_eq!(err.to_string(), "invalid LineType value 'dashed'");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ScaleType::default(), ScaleType::Linear);
        assert_eq!(MappingType::default(), MappingType::Time);
        assert_eq!(LineType::default(), LineType::None);
    }
}
