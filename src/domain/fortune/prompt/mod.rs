//! 운세 프롬프트 디스패처
//!
//! 카테고리 이름(동의어 포함)을 템플릿 기술자에 매핑하고, 출생 정보 문구와 기준일을
//! 채워 생성 요청에 필요한 [`PromptSpec`]을 만듭니다.
//!
//! ## 구조
//! - `system`: 모든 카테고리가 공유하는 시스템 지시문
//! - `periodic`: 오늘/내일/이번 달/올해
//! - `lifelong`: 평생/애정/재물/사업/학업
//! - `special`: 전생/궁합/기타

mod lifelong;
mod periodic;
mod special;
mod system;

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;

use super::birth::FortuneSubject;

pub use system::SYSTEM_INSTRUCTION;

/// 카테고리가 비어 있을 때 사용하는 기본값
pub const DEFAULT_CATEGORY: &str = "오늘의 운세";

/// 카테고리 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Today,
    Tomorrow,
    ThisMonth,
    ThisYear,
    Lifetime,
    Love,
    Wealth,
    Business,
    Study,
    PastLife,
    Compatibility,
    /// 표에 없는 카테고리. 원래 이름으로 템플릿을 채움
    Generic,
}

impl CategoryKind {
    /// 카테고리 이름 해석. 모르는 이름은 [`CategoryKind::Generic`]
    pub fn of(label: &str) -> Self {
        lookup(label).map_or(CategoryKind::Generic, |template| template.kind)
    }

    pub fn is_compatibility(&self) -> bool {
        matches!(self, CategoryKind::Compatibility)
    }
}

/// 템플릿 빌더에 전달되는 값
pub struct PromptContext<'a> {
    /// 출생 정보 문구
    pub subject: &'a str,
    /// 요청된 카테고리 이름 (앞뒤 공백 제거)
    pub category: &'a str,
    /// 오늘/내일/이번 달/올해 계산 기준일
    pub today: NaiveDate,
}

/// 카테고리 템플릿 기술자
pub struct CategoryTemplate {
    pub kind: CategoryKind,
    pub aliases: &'static [&'static str],
    /// 최대 생성 토큰 수
    pub token_budget: u32,
    build_instruction: fn(&PromptContext) -> String,
}

static TEMPLATES: [CategoryTemplate; 11] = [
    CategoryTemplate {
        kind: CategoryKind::Today,
        aliases: &["오늘의 운세"],
        token_budget: 1500,
        build_instruction: periodic::today,
    },
    CategoryTemplate {
        kind: CategoryKind::Tomorrow,
        aliases: &["내일의 운세"],
        token_budget: 1500,
        build_instruction: periodic::tomorrow,
    },
    CategoryTemplate {
        kind: CategoryKind::ThisMonth,
        aliases: &["이달의 운세"],
        token_budget: 1800,
        build_instruction: periodic::this_month,
    },
    CategoryTemplate {
        kind: CategoryKind::ThisYear,
        aliases: &["올해의 운세"],
        token_budget: 2800,
        build_instruction: periodic::this_year,
    },
    CategoryTemplate {
        kind: CategoryKind::Lifetime,
        aliases: &["평생 운세", "평생운세"],
        token_budget: 3500,
        build_instruction: lifelong::lifetime,
    },
    CategoryTemplate {
        kind: CategoryKind::Love,
        aliases: &["애정 운세", "연애운"],
        token_budget: 2500,
        build_instruction: lifelong::love,
    },
    CategoryTemplate {
        kind: CategoryKind::Wealth,
        aliases: &["재물 운세", "재물운", "금전 운세"],
        token_budget: 2800,
        build_instruction: lifelong::wealth,
    },
    CategoryTemplate {
        kind: CategoryKind::Business,
        aliases: &["사업운", "사업 운세"],
        token_budget: 1800,
        build_instruction: lifelong::business,
    },
    CategoryTemplate {
        kind: CategoryKind::Study,
        aliases: &["학업운", "학업 운세"],
        token_budget: 1600,
        build_instruction: lifelong::study,
    },
    CategoryTemplate {
        kind: CategoryKind::PastLife,
        aliases: &["전생 운세", "전생운세", "past-life"],
        token_budget: 2200,
        build_instruction: special::past_life,
    },
    CategoryTemplate {
        kind: CategoryKind::Compatibility,
        aliases: &["궁합", "compatibility"],
        token_budget: 2500,
        build_instruction: special::compatibility,
    },
];

static GENERIC_TEMPLATE: CategoryTemplate = CategoryTemplate {
    kind: CategoryKind::Generic,
    aliases: &[],
    token_budget: 2000,
    build_instruction: special::generic,
};

static ALIASES: LazyLock<HashMap<&'static str, &'static CategoryTemplate>> =
    LazyLock::new(|| {
        TEMPLATES
            .iter()
            .flat_map(|template| template.aliases.iter().map(move |alias| (*alias, template)))
            .collect()
    });

/// 카테고리 이름(동의어 포함)으로 템플릿 조회
pub fn lookup(label: &str) -> Option<&'static CategoryTemplate> {
    ALIASES.get(label.trim()).copied()
}

/// 생성 호출에 필요한 프롬프트 묶음
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub system_instruction: String,
    pub user_instruction: String,
    pub token_budget: u32,
}

/// 카테고리와 출생 정보로 프롬프트를 만듭니다.
///
/// 출생 정보 검증은 호출자가 먼저 수행합니다. 음력 생년월일은 이 단계에서 양력으로 정규화됩니다.
pub fn dispatch(category: &str, subject: &FortuneSubject, today: NaiveDate) -> PromptSpec {
    let category = category.trim();
    let template = lookup(category).unwrap_or(&GENERIC_TEMPLATE);
    let subject = subject.describe();

    let ctx = PromptContext {
        subject: &subject,
        category,
        today,
    };

    PromptSpec {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_instruction: (template.build_instruction)(&ctx),
        token_budget: template.token_budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fortune::birth::{
        BirthRecord, CalendarType, CompatibilityPair, Gender,
    };

    fn reference_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn single(date: &str) -> FortuneSubject {
        FortuneSubject::Single(BirthRecord::new(date).with_gender(Gender::Male))
    }

    #[test]
    fn should_build_today_prompt_for_solar_male() {
        // Arrange
        let subject = single("1990-01-01");

        // Act
        let spec = dispatch("오늘의 운세", &subject, reference_day());

        // Assert
        assert_eq!(spec.token_budget, 1500);
        assert!(spec.user_instruction.contains("생년월일: 1990-01-01 (양력)"));
        assert!(spec.user_instruction.contains("성별: 남성"));
        assert!(spec.user_instruction.contains("2025년 03월 14일 오늘의 운세"));
        assert_eq!(spec.system_instruction, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn should_interpolate_reference_date_for_periodic_categories() {
        let subject = single("1990-01-01");
        let day = reference_day();

        assert!(dispatch("내일의 운세", &subject, day)
            .user_instruction
            .contains("2025년 03월 15일 내일의 운세"));
        assert!(dispatch("이달의 운세", &subject, day)
            .user_instruction
            .contains("2025년 03월 이번 달 운세"));
        assert!(dispatch("올해의 운세", &subject, day)
            .user_instruction
            .contains("2025년 올해 운세"));
    }

    #[test]
    fn should_roll_tomorrow_over_year_end() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let spec = dispatch("내일의 운세", &single("1990-01-01"), day);

        assert!(spec.user_instruction.contains("2025년 01월 01일 내일의 운세"));
    }

    #[test]
    fn should_share_budget_and_system_instruction_across_aliases() {
        let subject = single("1985-07-20");
        let day = reference_day();

        for template in TEMPLATES.iter() {
            let specs: Vec<PromptSpec> = template
                .aliases
                .iter()
                .map(|alias| dispatch(alias, &subject, day))
                .collect();

            for spec in &specs {
                assert_eq!(spec.token_budget, template.token_budget, "{:?}", template.kind);
                assert_eq!(spec.system_instruction, specs[0].system_instruction);
                assert_eq!(spec.user_instruction, specs[0].user_instruction);
            }
        }
    }

    #[test]
    fn should_route_wealth_synonyms_to_same_template() {
        for alias in ["재물운", "재물 운세", "금전 운세"] {
            assert_eq!(CategoryKind::of(alias), CategoryKind::Wealth);
            assert_eq!(lookup(alias).map(|t| t.token_budget), Some(2800));
        }
    }

    #[test]
    fn should_trim_category_before_lookup() {
        assert_eq!(CategoryKind::of("  궁합 "), CategoryKind::Compatibility);
        assert!(CategoryKind::of("compatibility").is_compatibility());
    }

    #[test]
    fn should_treat_english_period_names_as_generic() {
        let spec = dispatch("today", &single("1990-01-01"), reference_day());

        assert_eq!(CategoryKind::of("today"), CategoryKind::Generic);
        assert_eq!(spec.token_budget, 2000);
    }

    #[test]
    fn should_fall_back_to_generic_template_with_category_name() {
        let spec = dispatch("토정비결", &single("1990-01-01"), reference_day());

        assert_eq!(CategoryKind::of("토정비결"), CategoryKind::Generic);
        assert_eq!(spec.token_budget, 2000);
        assert!(spec.user_instruction.contains("'토정비결'를 매우 상세하고"));
    }

    #[test]
    fn should_keep_budgets_within_range() {
        for template in TEMPLATES.iter().chain(std::iter::once(&GENERIC_TEMPLATE)) {
            assert!((1500..=3500).contains(&template.token_budget));
        }
    }

    #[test]
    fn should_not_leave_placeholders_in_any_template() {
        let subject = single("1990-01-01");
        let labels = TEMPLATES
            .iter()
            .flat_map(|t| t.aliases.iter().copied())
            .chain(["띠별운세"]);

        for label in labels {
            let spec = dispatch(label, &subject, reference_day());
            assert!(!spec.user_instruction.contains('{'), "{label}");
            assert!(!spec.user_instruction.contains('}'), "{label}");
        }
    }

    #[test]
    fn should_forbid_specific_dates_for_timeless_categories() {
        let subject = single("1990-01-01");

        for label in ["애정 운세", "재물운", "사업운", "학업운", "별자리운세"] {
            let spec = dispatch(label, &subject, reference_day());
            assert!(spec.user_instruction.contains("특정 날짜(오늘, 내일, 이번 달"), "{label}");
        }
    }

    #[test]
    fn should_describe_both_people_for_compatibility() {
        let pair = FortuneSubject::Pair(CompatibilityPair {
            first: BirthRecord::new("1990-01-01").with_gender(Gender::Male),
            second: BirthRecord::new("2000-03-01")
                .with_calendar(CalendarType::Lunar)
                .with_gender(Gender::Female),
        });

        let spec = dispatch("궁합", &pair, reference_day());

        assert_eq!(spec.token_budget, 2500);
        assert!(spec.user_instruction.contains("첫 번째 사람: 생년월일: 1990-01-01 (양력)"));
        assert!(spec
            .user_instruction
            .contains("두 번째 사람: 생년월일: 2000-04-05 (양력) [원래 음력: 2000-03-01]"));
        assert!(spec.user_instruction.contains("인 두 사람의 궁합"));
    }
}
