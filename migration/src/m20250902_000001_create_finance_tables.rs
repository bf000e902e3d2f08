use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 缴费表 ====================
        // (student_id, course_id, payment_month) 不加唯一约束，旧数据的月份可能为空
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(ColumnDef::new(Payments::PaymentDate).string().not_null())
                    .col(ColumnDef::new(Payments::PaymentMonth).string().null())
                    .col(ColumnDef::new(Payments::StudentName).string().null())
                    .col(ColumnDef::new(Payments::CourseName).string().null())
                    .col(ColumnDef::new(Payments::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_payment_month")
                    .table(Payments::Table)
                    .col(Payments::PaymentMonth)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_student_course")
                    .table(Payments::Table)
                    .col(Payments::StudentId)
                    .col(Payments::CourseId)
                    .to_owned(),
            )
            .await?;

        // ==================== 支出表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Name).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::ExpenseDate).string().not_null())
                    .col(ColumnDef::new(Expenses::ExpenseMonth).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::Category)
                            .string()
                            .not_null()
                            .default("UTILITY"),
                    )
                    .col(ColumnDef::new(Expenses::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Expenses::TeacherName).string().null())
                    .col(ColumnDef::new(Expenses::Description).text().null())
                    .col(ColumnDef::new(Expenses::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_expenses_expense_month")
                    .table(Expenses::Table)
                    .col(Expenses::ExpenseMonth)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_expenses_teacher_month")
                    .table(Expenses::Table)
                    .col(Expenses::TeacherId)
                    .col(Expenses::ExpenseMonth)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    StudentId,
    CourseId,
    Amount,
    PaymentDate,
    PaymentMonth,
    StudentName,
    CourseName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    #[sea_orm(iden = "expenses")]
    Table,
    Id,
    Name,
    Amount,
    ExpenseDate,
    ExpenseMonth,
    Category,
    TeacherId,
    TeacherName,
    Description,
    CreatedAt,
}
