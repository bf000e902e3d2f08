use serde::Deserialize;

use crate::utils::validate::FieldErrors;

fn check_name(errors: &mut FieldErrors, name: &str) {
    errors.require_text(name, "name", "Course name is required!");
    let len = name.trim().chars().count();
    errors.check(
        (3..=100).contains(&len),
        "name",
        "Course name must be between 3 and 100 characters!",
    );
}

fn check_fee(errors: &mut FieldErrors, fee: f64) {
    errors.check(
        fee.is_finite() && fee > 0.0,
        "fee",
        "Course fee must be positive!",
    );
}

// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub fee: Option<f64>,
    pub teacher_ids: Option<Vec<i64>>,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_name(&mut errors, &self.name);
        match self.fee {
            Some(fee) => check_fee(&mut errors, fee),
            None => errors.add("fee", "Course fee is required!"),
        }
        errors.finish()
    }
}

// 更新课程请求，teacherIds 存在时整体替换授课教师
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub fee: Option<f64>,
    pub teacher_ids: Option<Vec<i64>>,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_name(&mut errors, name);
        }
        if let Some(fee) = self.fee {
            check_fee(&mut errors, fee);
        }
        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_validation() {
        let req: CreateCourseRequest =
            serde_json::from_str(r#"{"name":"Go","fee":0,"teacherIds":[1]}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Course name must be between 3 and 100 characters!")
        );
        assert_eq!(errors.get("fee"), Some("Course fee must be positive!"));

        let ok: CreateCourseRequest =
            serde_json::from_str(r#"{"name":"Rust Basics","fee":1500}"#).unwrap();
        assert!(ok.validate().is_ok());
        assert!(ok.teacher_ids.is_none());
    }

    #[test]
    fn test_missing_fee() {
        let req: CreateCourseRequest = serde_json::from_str(r#"{"name":"Physics"}"#).unwrap();
        assert_eq!(
            req.validate().unwrap_err().get("fee"),
            Some("Course fee is required!")
        );
    }

    #[test]
    fn test_update_course_only_checks_present_fields() {
        assert!(UpdateCourseRequest::default().validate().is_ok());
        let req = UpdateCourseRequest {
            fee: Some(-5.0),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
