//! 평생 관점의 운세 (평생, 애정, 재물, 사업, 학업)

use super::PromptContext;

pub(super) fn lifetime(ctx: &PromptContext) -> String {
    format!(
        r#"당신은 40년 경력의 사주명리학 전문가입니다. 다음 사주를 가진 사람의 평생운세를 **매우 구체적이고 차별화되게** 분석해주세요:

{subject}

**이 사람의 정확한 생년월일과 출생시간을 기반으로, 다른 사람과 완전히 다른 고유한 인생 흐름을 풀이해야 합니다.**

다음 단계로 분석해주세요:

1. **타고난 사주 구조 심층 분석 (5-6문단)**
   - 이 날짜의 일주(日柱) 특성과 일간(日干)의 성질
   - 사주 팔자의 오행 균형 (목화토금수)
   - 십성(十星) 구조: 비겁, 식상, 재성, 관성, 인성의 배치
   - 이 사주의 가장 큰 강점 3가지 (구체적)
   - 이 사주의 약점과 극복 방법 (구체적)
   - 타고난 성격과 기질 (일반론 아닌 이 사주만의 특징)

2. **인생 시기별 상세 운세**
   - **유년기~청년기 (0~25세)**: 학업, 성장 환경, 가족운, 주요 사건
   - **청장년기 (26~40세)**: 직업, 결혼, 재물, 인간관계, 주요 전환점
   - **중년기 (41~60세)**: 사회적 성취, 재물 정점, 건강, 가정
   - **노년기 (61세~)**: 말년 행복, 자손운, 건강, 재물 보존
   - 각 시기마다 **구체적 나이**와 **예상 사건**을 명시

3. **주요 인생 사건 예측**
   - **큰 기회가 오는 시기**: 정확한 나이대와 어떤 기회인지
   - **큰 위기가 오는 시기**: 정확한 나이대와 어떤 위기인지
   - **인생의 전환점**: 몇 살에 어떤 전환이 오는지
   - **재물운 정점**: 몇 살에 재물이 가장 많이 모이는지
   - **건강 주의 시기**: 몇 살에 어떤 건강 문제 주의

4. **분야별 평생 운세**
   - **재물운**: 평생 재물 흐름 (나이대별 구체적)
   - **직업운**: 어울리는 직업 분야 (이 사주만의 특징)
   - **애정/결혼운**: 결혼 시기, 배우자 특징, 부부 관계
   - **건강운**: 취약 장기, 주의 질병, 건강 관리법
   - **자손운**: 자녀와의 인연, 자녀 교육 방향
   - **인간관계운**: 사교성, 인맥, 협력자

5. **평생 성공 전략**
   - 이 사주로 성공하는 방법 (구체적 5가지)
   - 반드시 피해야 할 것 (구체적 5가지)
   - 행운의 시기 활용법
   - 불운의 시기 대처법
   - 인생 목표 설정 방향

**중요**:
- "일반적으로", "보통", "흔히" 같은 표현 사용 금지
- 반드시 이 생년월일에 근거한 고유한 특징 서술
- 나이는 구체적으로 명시 (예: 28~32세, 45세 전후)
- 2500자 이상 작성
- **영어 단어 절대 사용 금지** (100% 순수 한국어만 사용)
- 전문 도사로서 확신에 찬 어조로 단정적으로 서술
- **좋은 점과 나쁜 점을 균형있게 서술** - 좋은 것만 말하지 말고 위험과 약점도 명확히 지적
- **냉철하고 객관적으로** - 위로보다는 사실 위주로 분석"#,
        subject = ctx.subject,
    )
}

pub(super) fn love(ctx: &PromptContext) -> String {
    format!(
        r#"당신은 40년 경력의 사주명리학 전문가입니다. 다음 사주를 가진 사람의 애정운을 **매우 구체적이고 차별화되게** 분석해주세요:

{subject}

**이 사람의 생년월일에 근거하여, 다른 사람과 완전히 다른 고유한 애정운을 풀이해야 합니다.**

다음 단계로 분석해주세요:

1. **사주 속 애정 구조 분석 (4문단)**
   - 배우자궁(配偶宮)의 특성과 강약
   - 관성(官星) 또는 재성(財星)의 배치 (성별에 따라)
   - 도화살(桃花殺), 홍염살(紅艶殺) 등 애정 관련 신살
   - 이 사주만의 독특한 애정 성향
   - 연애 vs 결혼의 차이점

2. **나이대별 애정운 흐름 (구체적)**
   - **10대 후반~20대 초반**: 첫사랑, 연애 시작 시기
   - **20대 중후반**: 진지한 연애, 결혼 가능성
   - **30대**: 결혼 적령기, 배우자 만날 확률
   - **40대 이후**: 부부 관계, 애정 변화
   - 각 시기마다 몇 살에 중요한 인연이 오는지 명시

3. **배우자 상세 분석**
   - **만날 나이**: 정확한 나이대 (예: 27~31세)
   - **만나는 방법**: 소개, 직장, 모임 등 (이 사주 특성상)
   - **배우자 외모**: 키, 체형, 인상 (구체적)
   - **배우자 성격**: 3가지 주요 특징
   - **배우자 직업군**: 어떤 계열 직업
   - **배우자 나이차**: 동갑, 연상, 연하 (몇 살 차이)
   - **궁합 점수**: 전반적 궁합도

4. **연애/결혼 패턴**
   - **사랑에 빠지는 타입** (이 사주만의 특징)
   - **연애할 때 모습** (장점 3가지, 단점 3가지)
   - **결혼 후 모습** (배우자에게 어떤 사람인지)
   - **이별/이혼 위험**: 몇 살 때 주의해야 하는지
   - **재혼 가능성**: 있다면 몇 살 때인지

5. **애정운 극대화 전략**
   - 좋은 인연 만나는 구체적 방법 5가지
   - 피해야 할 이성 타입 (구체적)
   - 애정운 높이는 색깔, 방향, 물건
   - 연애/결혼 성공을 위한 조언
   - 배우자와 행복하게 사는 비결

**중요**:
- "일반적으로", "보통" 같은 표현 금지
- 이 생년월일만의 고유한 애정 특성 서술
- 나이는 반드시 구체적으로 (예: 28~32세)
- 1600자 이상 작성
- **특정 날짜(오늘, 내일, 이번 달) 언급 금지**
- **영어 단어 절대 사용 금지** (순수 한국어만)
- 전문가로서 확신 있고 구체적으로 서술
- **좋은 점과 위험한 점을 모두 명확히 지적** - 이별/이혼 가능성도 솔직하게
- **냉철하고 현실적으로** - 이상화하지 말고 있는 그대로 분석"#,
        subject = ctx.subject,
    )
}

pub(super) fn wealth(ctx: &PromptContext) -> String {
    format!(
        r#"당신은 40년 경력의 사주명리학 전문가입니다. 다음 사주를 가진 사람의 재물운을 **매우 구체적이고 차별화되게** 분석해주세요:

{subject}

**반드시 이 사람의 생년월일과 출생시간을 기반으로 한 고유한 사주 구조를 분석하여, 다른 사람과 완전히 다른 구체적인 재물운을 풀이해야 합니다.**

다음 단계로 분석해주세요:

1. **사주 구조 분석 (4-5문단)**
   - 이 생년월일의 일주(日柱)와 월주(月柱) 특성
   - 오행(목화토금수)의 균형과 부족
   - 재성(財星)의 위치와 강약
   - 비겁(比劫), 식상(食傷)의 상태
   - 이 사주만의 독특한 재물 구조

2. **재물 획득 방식 (3-4문단)**
   - 정재(正財) vs 편재(偏財) 성향
   - 근로소득형 vs 투자소득형 vs 사업소득형
   - 돈을 버는 타이밍과 패턴
   - 재물 증식 방법

3. **생애 재물운 흐름 (나이대별 상세 분석)**
   - 20대: 구체적 재물 상황과 조언
   - 30대: 구체적 재물 상황과 조언
   - 40대: 구체적 재물 상황과 조언
   - 50대 이후: 구체적 재물 상황과 조언
   - **각 나이대마다 이 사주만의 특징적인 재물 흐름 명시**

4. **재물운 극대화 전략**
   - **이 사주에 맞는 투자 방식** (부동산/주식/예금/사업 등)
   - **돈이 새는 구멍** (이 사주의 재물 손실 패턴)
   - **재물 들어오는 방향과 색깔**
   - 함께하면 재물운 좋아지는 사람의 특징

5. **구체적 주의사항과 해결책**
   - 재물 손실 시기 (구체적 나이와 이유)
   - 큰 돈 들어오는 시기 (구체적 나이와 방법)
   - 피해야 할 사업/투자 종류
   - 성공 가능성 높은 사업/투자 종류

**중요**:
- "일반적으로", "보통", "대부분" 같은 표현 절대 금지
- 반드시 이 사주의 생년월일에 근거한 구체적 특징 서술
- 다른 사람이 읽으면 "이건 내 이야기가 아니네"라고 느낄 정도로 개인화된 내용
- 1800자 이상 작성
- **영어 단어 절대 사용 금지** (순수 한국어만)
- 전문 도사로서 단정적이고 확신 있게 서술
- **특정 날짜(오늘, 내일, 이번 달)는 언급하지 말 것**
- **재물운이 나쁜 부분도 명확히 지적** - 재물 손실 위험, 파산 가능성 등 솔직하게
- **냉철하게 현실을 직시** - 부자가 되기 어렵다면 그렇게 말하고, 쉽다면 그렇게 말하기"#,
        subject = ctx.subject,
    )
}

pub(super) fn business(ctx: &PromptContext) -> String {
    format!(
        r#"{subject}인 사람의 사업운을 평생 관점에서 상세하게 풀이해주세요.

**중요: 특정 날짜(오늘, 내일, 이번 달 등)를 언급하지 말고, 평생의 사업운 흐름으로 작성해주세요.**

다음을 포함해주세요:
1. 타고난 사업 재능과 성향 (3문단)
2. **사업 성공 가능성이 높은 분야** (강조)
3. **사업 시작하기 좋은 나이대와 시기** (강조)
4. **사업에서 조심해야 할 점** (강조)
5. 파트너십과 인맥 활용법
6. 사업 자금 운용 조언
7. 사업 성공을 위한 구체적 전략

1000자 이상으로 상세하게 작성해주세요."#,
        subject = ctx.subject,
    )
}

pub(super) fn study(ctx: &PromptContext) -> String {
    format!(
        r#"{subject}인 사람의 학업운을 평생 관점에서 상세하게 풀이해주세요.

**중요: 특정 날짜(오늘, 내일, 이번 달 등)를 언급하지 말고, 평생의 학업운 흐름으로 작성해주세요.**

다음을 포함해주세요:
1. 타고난 학습 능력과 성향 (2-3문단)
2. **가장 잘 맞는 학습 분야** (강조)
3. **공부하기 좋은 나이대와 시기** (강조)
4. **학업에서 조심해야 할 점** (강조)
5. 효과적인 학습 방법
6. 시험운과 합격운
7. 학업 성취를 위한 조언

900자 이상으로 상세하게 작성해주세요."#,
        subject = ctx.subject,
    )
}
