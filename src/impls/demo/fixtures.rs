use crate::core::models::survey::{Question, Survey};

pub const ADMIN_ID: &str = "admin-001";
pub const ADMIN_TOKEN: &str = "mock-admin-token-12345";
pub const DEMO_ID: &str = "demo-001";
pub const DEMO_TOKEN: &str = "mock-demo-token-67890";

pub struct SeedAccount {
    pub id: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub token: &'static str,
}

pub struct SeedSurvey {
    pub survey: Survey,
    pub total: u64,
    pub counts: Vec<Vec<u64>>,
}

pub fn accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount {
            id: ADMIN_ID,
            username: "admin",
            password: "admin",
            token: ADMIN_TOKEN,
        },
        SeedAccount {
            id: DEMO_ID,
            username: "demo",
            password: "demo",
            token: DEMO_TOKEN,
        },
    ]
}

fn survey(id: &str, title: &str, created_at: &str, questions: Vec<Question>) -> Survey {
    Survey {
        id: id.into(),
        title: title.into(),
        questions: questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| q.with_id(format!("q{}", i + 1)))
            .collect(),
        created_at: Some(created_at.into()),
        creator_id: Some(ADMIN_ID.into()),
    }
}

pub fn surveys() -> Vec<SeedSurvey> {
    vec![
        SeedSurvey {
            survey: survey(
                "SURVEY-001",
                "Опрос об удовлетворенности клиентов",
                "2024-11-25T10:00:00Z",
                vec![
                    Question::new("Насколько вы удовлетворены нашим сервисом?", ["Очень доволен", "Доволен", "Нейтрально", "Недоволен"]),
                    Question::new("Порекомендуете ли вы нас своим друзьям?", ["Определенно да", "Скорее да", "Скорее нет", "Определенно нет"]),
                    Question::new("Что вам больше всего понравилось?", ["Качество продукта", "Обслуживание", "Цены", "Удобство"]),
                ],
            ),
            total: 247,
            counts: vec![vec![120, 85, 30, 12], vec![140, 75, 22, 10], vec![95, 88, 40, 24]],
        },
        SeedSurvey {
            survey: survey(
                "SURVEY-002",
                "Опрос о рабочей среде",
                "2024-11-26T14:30:00Z",
                vec![
                    Question::new(
                        "Насколько комфортно вы чувствуете себя на рабочем месте?",
                        ["Очень комфортно", "Комфортно", "Не очень комфортно", "Некомфортно"],
                    ),
                    Question::new(
                        "Довольны ли вы балансом работы и личной жизни?",
                        ["Да, полностью", "Скорее да", "Скорее нет", "Нет, совсем не доволен"],
                    ),
                ],
            ),
            total: 156,
            counts: vec![vec![65, 70, 15, 6], vec![50, 75, 25, 6]],
        },
        SeedSurvey {
            survey: survey(
                "SURVEY-003",
                "Опрос о новых технологиях",
                "2024-11-27T09:15:00Z",
                vec![
                    Question::new(
                        "Какие технологии вы используете чаще всего?",
                        ["Веб-технологии", "Мобильные приложения", "Облачные сервисы", "Искусственный интеллект"],
                    ),
                    Question::new("Как часто вы изучаете новые технологии?", ["Ежедневно", "Еженедельно", "Ежемесячно", "Редко"]),
                    Question::new(
                        "Что вас больше всего интересует в IT?",
                        ["Программирование", "Дизайн", "Аналитика данных", "Кибербезопасность"],
                    ),
                    Question::new("Предпочитаете ли вы работать удаленно?", ["Да, только удаленно", "Гибридный формат", "Предпочитаю офис"]),
                ],
            ),
            total: 89,
            counts: vec![vec![40, 25, 15, 9], vec![35, 40, 10, 4], vec![45, 18, 20, 6], vec![35, 50, 4]],
        },
        SeedSurvey {
            survey: survey(
                "SURVEY-004",
                "Быстрый опрос о предпочтениях",
                "2024-11-28T16:45:00Z",
                vec![
                    Question::new("Ваш любимый цвет?", ["Синий", "Красный", "Зеленый", "Желтый"]),
                    Question::new("Предпочитаете кофе или чай?", ["Кофе", "Чай"]),
                ],
            ),
            total: 0,
            counts: vec![vec![0, 0, 0, 0], vec![0, 0]],
        },
    ]
}

/// Rating vocabulary the demo generator cycles through.
pub const GENERATED_ANSWERS: [&str; 14] = [
    "Отлично",
    "Хорошо",
    "Удовлетворительно",
    "Плохо",
    "Очень плохо",
    "Определенно да",
    "Скорее да",
    "Скорее нет",
    "Определенно нет",
    "Полностью согласен",
    "Согласен",
    "Нейтрально",
    "Не согласен",
    "Совершенно не согласен",
];
