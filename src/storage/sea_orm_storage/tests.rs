use super::SeaOrmStorage;
use crate::entity::payments::ActiveModel as PaymentActiveModel;
use crate::errors::LmsError;
use crate::models::{
    courses::{entities::Course, requests::CreateCourseRequest},
    expenses::{entities::ExpenseCategory, requests::NewExpense},
    payments::requests::{NewPayment, PaymentListQuery},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    teachers::{entities::Teacher, requests::NewTeacher},
    users::entities::UserRole,
};
use crate::storage::Storage;
use sea_orm::{ActiveModelTrait, Set};

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::connect_memory()
        .await
        .expect("in-memory storage")
}

async fn course(s: &SeaOrmStorage, name: &str, fee: f64) -> Course {
    s.create_course(CreateCourseRequest {
        name: name.to_string(),
        description: None,
        fee: Some(fee),
        teacher_ids: None,
    })
    .await
    .unwrap()
}

async fn student(s: &SeaOrmStorage, name: &str, course_ids: Vec<i64>) -> Student {
    s.create_student(CreateStudentRequest {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "9800000000".to_string(),
        enrollment_date: Some("2025-08-01".to_string()),
        course_ids: Some(course_ids),
    })
    .await
    .unwrap()
}

async fn teacher(s: &SeaOrmStorage, username: &str, salary: f64) -> Teacher {
    s.create_teacher(NewTeacher {
        username: username.to_string(),
        password_hash: "hash".to_string(),
        name: format!("Teacher {username}"),
        email: None,
        phone: "9811111111".to_string(),
        salary,
    })
    .await
    .unwrap()
}

fn payment(student_id: i64, course_id: i64, amount: f64, month: &str) -> NewPayment {
    NewPayment {
        student_id,
        course_id,
        amount,
        payment_date: format!("{month}-10"),
        payment_month: month.to_string(),
        student_name: None,
        course_name: None,
    }
}

fn salary(t: &Teacher, amount: f64, month: &str) -> NewExpense {
    NewExpense {
        name: format!("Salary - {}", t.name),
        amount,
        expense_date: format!("{month}-28"),
        expense_month: month.to_string(),
        category: ExpenseCategory::Salary,
        teacher_id: Some(t.id),
        teacher_name: Some(t.name.clone()),
        description: None,
    }
}

fn month_query(month: &str) -> PaymentListQuery {
    PaymentListQuery {
        month: Some(month.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_revenue_includes_legacy_rows() {
    let s = storage().await;
    let c = course(&s, "Mathematics", 500.0).await;
    let a = student(&s, "Asha", vec![c.id]).await;
    let b = student(&s, "Bikash", vec![c.id]).await;

    s.create_payment(payment(a.id, c.id, 500.0, "2025-08")).await.unwrap();
    s.create_payment(payment(b.id, c.id, 700.0, "2025-08")).await.unwrap();
    s.create_payment(payment(a.id, c.id, 900.0, "2025-09")).await.unwrap();

    // 旧数据：没有 payment_month，只能按日期归属
    PaymentActiveModel {
        student_id: Set(b.id),
        course_id: Set(c.id),
        amount: Set(100.0),
        payment_date: Set("2025-08-20".to_string()),
        payment_month: Set(None),
        created_at: Set(0),
        ..Default::default()
    }
    .insert(&s.db)
    .await
    .unwrap();

    let august = s.list_payments(month_query("2025-08")).await.unwrap();
    let revenue: f64 = august.iter().map(|p| p.amount).sum();
    assert_eq!(august.len(), 3);
    assert_eq!(revenue, 1300.0);

    let september = s.list_payments(month_query("2025-09")).await.unwrap();
    assert_eq!(september.len(), 1);
    assert_eq!(september[0].student_name.as_deref(), Some("Asha"));
    assert_eq!(september[0].course_name.as_deref(), Some("Mathematics"));
}

#[tokio::test]
async fn test_duplicate_payment_rejected() {
    let s = storage().await;
    let c = course(&s, "Physics", 800.0).await;
    let a = student(&s, "Chandra", vec![c.id]).await;

    s.create_payment(payment(a.id, c.id, 800.0, "2025-08")).await.unwrap();
    let err = s
        .create_payment(payment(a.id, c.id, 800.0, "2025-08"))
        .await
        .unwrap_err();
    assert!(matches!(err, LmsError::BusinessRule(_)));

    let err = s
        .create_payment(payment(a.id + 100, c.id, 800.0, "2025-08"))
        .await
        .unwrap_err();
    assert!(matches!(err, LmsError::NotFound(_)));
}

#[tokio::test]
async fn test_unpaid_students_anti_join() {
    let s = storage().await;
    let math = course(&s, "Mathematics", 500.0).await;
    let art = course(&s, "Fine Arts", 300.0).await;
    let a = student(&s, "Asha", vec![math.id, art.id]).await;
    let b = student(&s, "Bikash", vec![math.id]).await;
    let _outsider = student(&s, "Chandra", vec![art.id]).await;

    s.create_payment(payment(a.id, math.id, 500.0, "2025-08")).await.unwrap();
    // 其他课程的缴费不影响数学课
    s.create_payment(payment(b.id, art.id, 300.0, "2025-08")).await.unwrap();

    let unpaid = s.list_unpaid_students(math.id, "2025-08").await.unwrap();
    let ids: Vec<i64> = unpaid.iter().map(|st| st.id).collect();
    assert_eq!(ids, vec![b.id]);

    let unpaid = s.list_unpaid_students(math.id, "2025-09").await.unwrap();
    assert_eq!(unpaid.len(), 2);
}

#[tokio::test]
async fn test_full_salary_once_per_month() {
    let s = storage().await;
    let t = teacher(&s, "ramesh", 30000.0).await;

    s.record_salary_payment(salary(&t, 30000.0, "2025-08"), true)
        .await
        .unwrap();
    assert!(s.has_salary_payment(t.id, "2025-08").await.unwrap());

    let err = s
        .record_salary_payment(salary(&t, 30000.0, "2025-08"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, LmsError::BusinessRule(_)));

    // 奖金等类型不做重复检查
    s.record_salary_payment(salary(&t, 5000.0, "2025-08"), false)
        .await
        .unwrap();

    assert!(s.list_unpaid_teachers("2025-08").await.unwrap().is_empty());
    let unpaid = s.list_unpaid_teachers("2025-09").await.unwrap();
    assert_eq!(unpaid.len(), 1);
    assert_eq!(unpaid[0].id, t.id);
}

#[tokio::test]
async fn test_teacher_shares_id_with_user_and_delete_cascades() {
    let s = storage().await;
    let t = teacher(&s, "sita", 25000.0).await;

    let user = s.get_user_by_id(t.id).await.unwrap().expect("linked user");
    assert_eq!(user.username, "sita");
    assert_eq!(user.roles, vec![UserRole::Teacher]);
    assert_eq!(t.username, "sita");

    let c = s
        .create_course(CreateCourseRequest {
            name: "Chemistry".to_string(),
            description: Some("Lab course".to_string()),
            fee: Some(900.0),
            teacher_ids: Some(vec![t.id]),
        })
        .await
        .unwrap();
    assert_eq!(c.teachers.len(), 1);

    assert!(s.delete_teacher(t.id).await.unwrap());
    assert!(s.get_user_by_id(t.id).await.unwrap().is_none());
    assert!(s.get_teacher_by_id(t.id).await.unwrap().is_none());
    let c = s.get_course_by_id(c.id).await.unwrap().unwrap();
    assert!(c.teachers.is_empty());
    assert!(!s.delete_teacher(t.id).await.unwrap());
}

#[tokio::test]
async fn test_missing_course_id_rejected() {
    let s = storage().await;
    let c = course(&s, "Biology", 400.0).await;
    let missing = c.id + 1;

    let err = s
        .create_student(CreateStudentRequest {
            name: "Dipa".to_string(),
            email: "dipa@example.com".to_string(),
            phone: "9800000001".to_string(),
            enrollment_date: None,
            course_ids: Some(vec![c.id, missing]),
        })
        .await
        .unwrap_err();

    match err {
        LmsError::Validation(msg) => {
            assert_eq!(msg, format!("Course not found with id: {missing}"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(
        s.list_students(StudentListQuery::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_enrolment_both_sides_agree() {
    let s = storage().await;
    let math = course(&s, "Mathematics", 500.0).await;
    let art = course(&s, "Fine Arts", 300.0).await;
    let a = student(&s, "Asha", vec![]).await;
    assert!(a.courses.is_empty());

    assert!(s.enroll_student(a.id, math.id).await.unwrap());
    assert!(!s.enroll_student(a.id, math.id).await.unwrap());

    let a = s.get_student_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(a.courses.len(), 1);
    assert_eq!(a.courses[0].id, math.id);
    let roster = s.list_course_students(math.id).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, a.id);

    // 整体替换选课
    let a = s
        .update_student(
            a.id,
            UpdateStudentRequest {
                course_ids: Some(vec![art.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a.courses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![art.id]);
    assert!(s.list_course_students(math.id).await.unwrap().is_empty());

    assert!(s.unenroll_student(a.id, art.id).await.unwrap());
    assert!(!s.unenroll_student(a.id, art.id).await.unwrap());

    let err = s.enroll_student(a.id, art.id + 100).await.unwrap_err();
    assert!(matches!(err, LmsError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_course_clears_enrolments() {
    let s = storage().await;
    let math = course(&s, "Mathematics", 500.0).await;
    let a = student(&s, "Asha", vec![math.id]).await;

    assert_eq!(s.count_course_enrollments().await.unwrap(), vec![(math.id, 1)]);
    assert!(s.delete_course(math.id).await.unwrap());

    let a = s.get_student_by_id(a.id).await.unwrap().unwrap();
    assert!(a.courses.is_empty());
    assert!(s.count_course_enrollments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_student_search_and_course_filter() {
    let s = storage().await;
    let math = course(&s, "Mathematics", 500.0).await;
    student(&s, "Asha", vec![math.id]).await;
    student(&s, "Bikash", vec![]).await;

    let found = s
        .list_students(StudentListQuery {
            search: Some("asha".to_string()),
            course_id: None,
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Asha");

    let in_math = s
        .list_students(StudentListQuery {
            search: None,
            course_id: Some(math.id),
        })
        .await
        .unwrap();
    assert_eq!(in_math.len(), 1);

    let none = s
        .list_students(StudentListQuery {
            search: Some("100%".to_string()),
            course_id: None,
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}
