use super::PromptContext;

pub(super) fn past_life(ctx: &PromptContext) -> String {
    format!(
        r#"{subject}인 사람의 전생 운세를 신비롭고 상세하게 풀이해주세요.

**중요: 전생의 삶과 현생과의 연결을 중심으로 작성해주세요.**

다음을 포함해주세요:
1. **전생에서의 신분과 삶** (3문단) - 어떤 시대, 어떤 사람이었는지
2. **전생에서 했던 일** (강조) - 직업, 역할, 특별한 경험
3. **전생의 업보와 인연** - 어떤 업을 지었고, 누구와 인연이 있었는지
4. **현생에 미치는 영향** (강조) - 전생의 업보가 현생에 어떻게 나타나는지
5. **풀어야 할 과제** - 이번 생에서 해결해야 할 전생의 업
6. **타고난 능력** - 전생에서 가져온 재능과 능력
7. **만날 인연** - 전생의 인연이 현생에서 다시 만날 가능성
8. **전생의 교훈** - 현생을 위한 전생의 가르침

1200자 이상으로 신비롭고 구체적으로 작성해주세요. 마치 도사가 보는 것처럼 생생하게 묘사해주세요."#,
        subject = ctx.subject,
    )
}

pub(super) fn compatibility(ctx: &PromptContext) -> String {
    format!(
        r#"{subject}인 두 사람의 궁합을 매우 상세하게 풀이해주세요.

**중요: 사주 기반으로 두 사람의 궁합을 전문적으로 분석해주세요.**

다음을 포함해주세요:
1. **전체 궁합 분석** (3문단) - 두 사람의 사주 구성과 조화
2. **성격 궁합** (강조) - 성격적 특징과 어울림
3. **애정 궁합** (강조) - 사랑과 감정적 교류
4. **재물 궁합** - 경제적 가치관과 금전 운
5. **장수 궁합** - 서로의 건강과 장수에 미치는 영향
6. **자손 궁합** - 자녀 운과 가족 운
7. **조심해야 할 점** (강조) - 갈등 가능성과 주의사항
8. **좋은 점** (강조) - 서로를 보완하는 장점
9. **관계 발전 조언** - 두 사람이 더 행복하기 위한 구체적 조언

1300자 이상으로 매우 상세하게 작성해주세요. 점수나 등급은 언급하지 말고, 깊이 있는 분석에 집중해주세요."#,
        subject = ctx.subject,
    )
}

/// 표에 없는 카테고리 (토정비결, 띠별운세, 별자리운세 등)
pub(super) fn generic(ctx: &PromptContext) -> String {
    format!(
        r#"{subject}인 사람의 '{category}'를 매우 상세하고 구체적으로 풀이해주세요.

**중요: 특정 날짜(오늘, 내일, 이번 달 등)를 언급하지 말고, 장기적 관점에서 작성해주세요.**

다음을 포함해주세요:
1. 전체적인 운세 개요 (3-4문단)
2. **특히 좋은 점** (강조)
3. **주의해야 할 점** (강조)
4. 시기별 흐름 (나이대 또는 연도별)
5. 구체적이고 실천 가능한 조언

1000자 이상으로 상세하게 작성해주세요. 일반적인 이야기가 아닌 구체적인 내용으로 작성해주세요."#,
        subject = ctx.subject,
        category = ctx.category,
    )
}
