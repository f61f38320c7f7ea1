//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub question_type: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub score: i32,
    pub sort_order: i32,
    // 选项 JSON 数组，仅选择题
    #[sea_orm(column_type = "Text", nullable)]
    pub options: Option<String>,
    // 多选题为 key 的 JSON 数组，其余为原始文本
    #[sea_orm(column_type = "Text", nullable)]
    pub correct_answer: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reference: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_question(
        self,
    ) -> crate::errors::Result<crate::models::questions::entities::Question> {
        use crate::errors::ClassworkError;
        use crate::models::questions::entities::{AnswerKey, Question, QuestionOption, QuestionType};

        let question_type: QuestionType = self
            .question_type
            .parse()
            .map_err(ClassworkError::serialization)?;

        let options: Vec<QuestionOption> = match self.options.as_deref() {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
            _ => Vec::new(),
        };

        let answer_key = AnswerKey::decode(question_type, self.correct_answer.as_deref())?;

        Ok(Question {
            id: self.id,
            assignment_id: self.assignment_id,
            question_type,
            content: self.content,
            score: self.score,
            order: self.sort_order,
            options,
            answer_key,
            reference: self.reference,
            explanation: self.explanation,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClassworkError;
    use crate::models::questions::entities::{AnswerKey, QuestionType};

    fn row(question_type: &str, correct_answer: Option<&str>) -> Model {
        Model {
            id: 1,
            assignment_id: 2,
            question_type: question_type.to_string(),
            content: "1 + 1 = 2".to_string(),
            score: 5,
            sort_order: 1,
            options: None,
            correct_answer: correct_answer.map(str::to_string),
            reference: None,
            explanation: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_into_question() {
        let question = row(QuestionType::TRUE_FALSE, Some("true")).into_question().unwrap();
        assert_eq!(question.question_type, QuestionType::TrueFalse);
        assert_eq!(question.order, 1);
        assert_eq!(
            question.answer_key,
            Some(AnswerKey::SingleKey("true".to_string()))
        );
    }

    #[test]
    fn test_unknown_type_is_serialization_error() {
        let err = row("matching", None).into_question().unwrap_err();
        assert!(matches!(err, ClassworkError::Serialization(_)));
    }
}
