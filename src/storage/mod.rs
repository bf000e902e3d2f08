use crate::models::{
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    expenses::{
        entities::Expense,
        requests::{ExpenseListQuery, NewExpense},
    },
    payments::{
        entities::Payment,
        requests::{NewPayment, PaymentListQuery},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{NewTeacher, TeacherChanges},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（连同角色）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    // 创建学生，course_ids 中不存在的课程会导致校验错误
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>>;
    // 更新学生，course_ids 存在时整体替换选课
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 选课，已选时返回 false
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<bool>;
    // 退课，未选时返回 false
    async fn unenroll_student(&self, student_id: i64, course_id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest)
    -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 课程的选课学生
    async fn list_course_students(&self, course_id: i64) -> Result<Vec<Student>>;
    // 教师所授课程
    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>>;
    // 每门课程的选课人数 (course_id, count)
    async fn count_course_enrollments(&self) -> Result<Vec<(i64, u64)>>;

    /// 教师管理方法
    // 创建教师及其登录账号（同一事务）
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn update_teacher(&self, id: i64, changes: TeacherChanges) -> Result<Option<Teacher>>;
    // 删除教师及其登录账号（同一事务）
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 缴费管理方法
    // 同一学生、课程、月份只允许一条缴费
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;
    async fn list_payments(&self, query: PaymentListQuery) -> Result<Vec<Payment>>;
    async fn delete_payment(&self, id: i64) -> Result<bool>;
    // 教师所授课程在某月的缴费
    async fn list_teacher_course_payments(
        &self,
        teacher_id: i64,
        month: &str,
    ) -> Result<Vec<Payment>>;
    // 选了课程但该月未缴费的学生
    async fn list_unpaid_students(&self, course_id: i64, month: &str) -> Result<Vec<Student>>;

    /// 支出管理方法
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense>;
    // 记录工资支出，reject_if_paid 为 true 时同月已有工资记录则拒绝（同一事务）
    async fn record_salary_payment(
        &self,
        expense: NewExpense,
        reject_if_paid: bool,
    ) -> Result<Expense>;
    async fn list_expenses(&self, query: ExpenseListQuery) -> Result<Vec<Expense>>;
    async fn delete_expense(&self, id: i64) -> Result<bool>;
    // 教师在某月是否已有工资记录
    async fn has_salary_payment(&self, teacher_id: i64, month: &str) -> Result<bool>;
    // 某月没有任何工资记录的教师
    async fn list_unpaid_teachers(&self, month: &str) -> Result<Vec<Teacher>>;
}
