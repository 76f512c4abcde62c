//! 기준일에 묶인 운세 (오늘, 내일, 이번 달, 올해)

use chrono::NaiveDate;

use super::PromptContext;

fn day_label(date: NaiveDate) -> String {
    date.format("%Y년 %m월 %d일").to_string()
}

pub(super) fn today(ctx: &PromptContext) -> String {
    daily(ctx.subject, &day_label(ctx.today), "오늘")
}

pub(super) fn tomorrow(ctx: &PromptContext) -> String {
    let tomorrow = ctx.today.succ_opt().unwrap_or(ctx.today);
    daily(ctx.subject, &day_label(tomorrow), "내일")
}

fn daily(subject: &str, date: &str, when: &str) -> String {
    format!(
        r#"{subject}인 사람의 **{date} {when}의 운세**를 상세하게 풀이해주세요.

다음을 포함해주세요:
1. {when}의 전체 운세 (2-3문단)
2. **{when} 특히 좋은 시간대** (강조)
3. **{when} 조심해야 할 일** (강조)
4. {when}의 재물운
5. {when}의 애정운
6. {when}의 건강운
7. {when}의 행운 색상과 방향
8. {when} 하면 좋은 일

800자 이상으로 구체적이고 실천 가능한 내용으로 작성해주세요."#
    )
}

pub(super) fn this_month(ctx: &PromptContext) -> String {
    let month = ctx.today.format("%Y년 %m월");
    format!(
        r#"{subject}인 사람의 **{month} 이번 달 운세**를 상세하게 풀이해주세요.

다음을 포함해주세요:
1. 이번 달 전체 운세 개요 (3문단)
2. **이번 달 가장 좋은 시기** (강조)
3. **이번 달 조심해야 할 시기** (강조)
4. 이번 달 재물운
5. 이번 달 애정운
6. 이번 달 건강운
7. 이번 달 인간관계운
8. 이번 달을 위한 조언

1000자 이상으로 상세하게 작성해주세요."#,
        subject = ctx.subject,
    )
}

pub(super) fn this_year(ctx: &PromptContext) -> String {
    let year = ctx.today.format("%Y년");
    format!(
        r#"{subject}인 사람의 {year} 올해 운세를 매우 상세하게 풀이해주세요.

다음 형식으로 작성해주세요:
1. 전체 운세 개요 (3-4문단)
2. **월별 운세 (매우 중요!)**: 1월, 2월, 3월, 4월, 5월, 6월, 7월, 8월, 9월, 10월, 11월, 12월 각 월마다 반드시 3-4문장씩 구체적으로 작성
3. **주의해야 할 시기와 사항** (강조)
4. **좋은 기회가 오는 시기** (강조)
5. 올해를 위한 구체적인 조언

월별 운세는 반드시 12개월 모두 빠짐없이 작성해주세요. 총 1800자 이상으로 매우 상세하게 작성해주세요."#,
        subject = ctx.subject,
    )
}
