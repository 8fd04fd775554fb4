use crate::utils::error::{Result, TerrainError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TerrainError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TerrainError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| TerrainError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_positive_number<T>(field_name: &str, value: T, min_value: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min_value {
        return Err(TerrainError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_finite_positive(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TerrainError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TerrainError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("source.path", "./tiles").is_ok());
        assert!(validate_path("source.path", "").is_err());
        assert!(validate_path("source.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let path = Some("./tiles".to_string());
        assert_eq!(validate_required_field("source.path", &path).unwrap(), "./tiles");

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("source.path", &missing),
            Err(TerrainError::MissingConfigError { field }) if field == "source.path"
        ));
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("source.heightmap_width", 65u32, 2).is_ok());
        assert!(validate_positive_number("source.heightmap_width", 1u32, 2).is_err());
    }

    #[test]
    fn test_validate_finite_positive() {
        assert!(validate_finite_positive("error", 77067.3).is_ok());
        assert!(validate_finite_positive("error", 0.0).is_err());
        assert!(validate_finite_positive("error", f64::NAN).is_err());
        assert!(validate_finite_positive("error", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("source.maximum_level", 18u32, 0, 30).is_ok());
        assert!(validate_range("source.maximum_level", 31u32, 0, 30).is_err());
    }
}
