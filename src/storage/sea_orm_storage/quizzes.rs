//! 测验存储操作

use super::SeaOrmStorage;
use super::numbering::{next_number, renumber_plan, reorder_plan};
use crate::entity::course_quizzes::{ActiveModel, Column, Entity as CourseQuizzes};
use crate::entity::quiz_questions::{
    self, ActiveModel as QuestionActiveModel, Entity as QuizQuestions,
};
use crate::errors::{CourseStudioError, Result};
use crate::models::quizzes::{
    entities::{NewQuizQuestion, QuizQuestion},
    requests::{CreateQuizRequest, QuizChanges},
    responses::QuizWithQuestions,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建测验及其题目，quiz_number 为章节内当前最大值加一
    pub async fn create_quiz_impl(
        &self,
        course_id: i64,
        section_id: i64,
        req: CreateQuizRequest,
        questions: Vec<NewQuizQuestion>,
    ) -> Result<QuizWithQuestions> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let last = CourseQuizzes::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_desc(Column::QuizNumber)
            .one(&txn)
            .await?;

        let model = ActiveModel {
            course_id: Set(course_id),
            section_id: Set(section_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            quiz_number: Set(next_number(last.map(|q| q.quiz_number))),
            pass_mark: Set(req.pass_mark),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let quiz = model
            .insert(&txn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("创建测验失败: {e}")))?;

        let questions = Self::insert_questions(&txn, quiz.id, questions).await?;
        txn.commit().await?;

        Ok(QuizWithQuestions {
            quiz: quiz.into_quiz(),
            questions,
        })
    }

    pub async fn get_quiz_by_id_impl(&self, quiz_id: i64) -> Result<Option<QuizWithQuestions>> {
        let Some(quiz) = CourseQuizzes::find_by_id(quiz_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询测验失败: {e}")))?
        else {
            return Ok(None);
        };

        let questions = Self::load_questions(&self.db, quiz.id).await?;
        Ok(Some(QuizWithQuestions {
            quiz: quiz.into_quiz(),
            questions,
        }))
    }

    pub async fn list_quizzes_impl(&self, section_id: i64) -> Result<Vec<QuizWithQuestions>> {
        let quizzes = CourseQuizzes::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::QuizNumber)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询测验列表失败: {e}")))?;

        let mut result = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            let questions = Self::load_questions(&self.db, quiz.id).await?;
            result.push(QuizWithQuestions {
                quiz: quiz.into_quiz(),
                questions,
            });
        }
        Ok(result)
    }

    /// 更新测验，提供题目时整体替换
    pub async fn update_quiz_impl(
        &self,
        quiz_id: i64,
        changes: QuizChanges,
    ) -> Result<Option<QuizWithQuestions>> {
        if CourseQuizzes::find_by_id(quiz_id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let txn = self.db.begin().await?;
        let mut model = ActiveModel {
            id: Set(quiz_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = changes.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = changes.description {
            model.description = Set(Some(description));
        }
        if let Some(pass_mark) = changes.pass_mark {
            model.pass_mark = Set(Some(pass_mark));
        }
        model
            .update(&txn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新测验失败: {e}")))?;

        if let Some(questions) = changes.questions {
            QuizQuestions::delete_many()
                .filter(quiz_questions::Column::QuizId.eq(quiz_id))
                .exec(&txn)
                .await?;
            Self::insert_questions(&txn, quiz_id, questions).await?;
        }
        txn.commit().await?;

        self.get_quiz_by_id_impl(quiz_id).await
    }

    /// 删除测验并重新编号同章节剩余测验
    pub async fn delete_quiz_impl(&self, quiz_id: i64) -> Result<bool> {
        let Some(quiz) = CourseQuizzes::find_by_id(quiz_id).one(&self.db).await? else {
            return Ok(false);
        };

        let txn = self.db.begin().await?;
        CourseQuizzes::delete_by_id(quiz_id)
            .exec(&txn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("删除测验失败: {e}")))?;

        let siblings = Self::quiz_numbers(&txn, quiz.section_id).await?;
        Self::apply_quiz_numbers(&txn, &renumber_plan(&siblings)).await?;
        txn.commit().await?;

        Ok(true)
    }

    pub async fn reorder_quizzes_impl(
        &self,
        section_id: i64,
        ids: &[i64],
    ) -> Result<Vec<QuizWithQuestions>> {
        let txn = self.db.begin().await?;
        let siblings = Self::quiz_numbers(&txn, section_id).await?;
        Self::apply_quiz_numbers(&txn, &reorder_plan(&siblings, ids)).await?;
        txn.commit().await?;

        self.list_quizzes_impl(section_id).await
    }

    async fn insert_questions<C: ConnectionTrait>(
        conn: &C,
        quiz_id: i64,
        questions: Vec<NewQuizQuestion>,
    ) -> Result<Vec<QuizQuestion>> {
        let mut inserted = Vec::with_capacity(questions.len());
        for (idx, q) in questions.into_iter().enumerate() {
            let model = QuestionActiveModel {
                quiz_id: Set(quiz_id),
                question: Set(q.question),
                options: Set(serde_json::to_string(&q.options)?),
                correct_answer: Set(q.correct_answer),
                explanation: Set(q.explanation),
                sort_order: Set(idx as i32 + 1),
                ..Default::default()
            };
            let row = model.insert(conn).await.map_err(|e| {
                CourseStudioError::database_operation(format!("创建测验题目失败: {e}"))
            })?;
            inserted.push(row.into_question());
        }
        Ok(inserted)
    }

    async fn load_questions<C: ConnectionTrait>(conn: &C, quiz_id: i64) -> Result<Vec<QuizQuestion>> {
        let rows = QuizQuestions::find()
            .filter(quiz_questions::Column::QuizId.eq(quiz_id))
            .order_by_asc(quiz_questions::Column::SortOrder)
            .all(conn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询测验题目失败: {e}")))?;
        Ok(rows.into_iter().map(|m| m.into_question()).collect())
    }

    async fn quiz_numbers<C: ConnectionTrait>(conn: &C, section_id: i64) -> Result<Vec<(i64, i32)>> {
        let rows = CourseQuizzes::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::QuizNumber)
            .order_by_asc(Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(|m| (m.id, m.quiz_number)).collect())
    }

    async fn apply_quiz_numbers<C: ConnectionTrait>(conn: &C, plan: &[(i64, i32)]) -> Result<()> {
        for &(id, number) in plan {
            CourseQuizzes::update_many()
                .col_expr(Column::QuizNumber, Expr::value(number))
                .filter(Column::Id.eq(id))
                .exec(conn)
                .await
                .map_err(|e| {
                    CourseStudioError::database_operation(format!("更新测验编号失败: {e}"))
                })?;
        }
        Ok(())
    }
}
