use super::calendar;

/// 출생시간을 모를 때 사용하는 표기
pub const UNKNOWN_BIRTH_TIME: &str = "모름";

/// 성별
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// 요청 값 파싱. `male`/`female` 외에는 모두 미지정
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("male") => Gender::Male,
            Some("female") => Gender::Female,
            _ => Gender::Unspecified,
        }
    }

    /// 프롬프트에 들어가는 한국어 표기
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Gender::Male => Some("남성"),
            Gender::Female => Some("여성"),
            Gender::Unspecified => None,
        }
    }
}

/// 생년월일 달력 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarType {
    #[default]
    Solar,
    Lunar,
}

impl CalendarType {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("lunar") => CalendarType::Lunar,
            _ => CalendarType::Solar,
        }
    }

    pub fn is_lunar(&self) -> bool {
        matches!(self, CalendarType::Lunar)
    }
}

/// 한 사람의 출생 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthRecord {
    pub birth_date: String,
    pub birth_time: String,
    pub gender: Gender,
    pub calendar_type: CalendarType,
}

impl BirthRecord {
    pub fn new(birth_date: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: UNKNOWN_BIRTH_TIME.to_string(),
            gender: Gender::Unspecified,
            calendar_type: CalendarType::Solar,
        }
    }

    pub fn with_time(mut self, birth_time: impl Into<String>) -> Self {
        self.birth_time = birth_time.into();
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_calendar(mut self, calendar_type: CalendarType) -> Self {
        self.calendar_type = calendar_type;
        self
    }

    /// 양력으로 정규화된 생년월일
    pub fn solar_date(&self) -> String {
        calendar::normalize(&self.birth_date, self.calendar_type.is_lunar())
    }

    /// 프롬프트에 삽입되는 출생 정보 문구
    ///
    /// `생년월일: 1990-01-27 (양력) [원래 음력: 1990-01-01], 출생시간: 모름, 성별: 남성`
    pub fn describe(&self) -> String {
        let mut clause = format!("생년월일: {} (양력)", self.solar_date());
        if self.calendar_type.is_lunar() {
            clause.push_str(&format!(" [원래 음력: {}]", self.birth_date));
        }
        clause.push_str(&format!(", 출생시간: {}", self.birth_time));
        if let Some(gender) = self.gender.label() {
            clause.push_str(&format!(", 성별: {}", gender));
        }
        clause
    }
}

/// 궁합을 볼 두 사람 (순서 무관)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityPair {
    pub first: BirthRecord,
    pub second: BirthRecord,
}

impl CompatibilityPair {
    pub fn describe(&self) -> String {
        format!(
            "첫 번째 사람: {}\n두 번째 사람: {}",
            self.first.describe(),
            self.second.describe()
        )
    }
}

/// 운세 대상
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FortuneSubject {
    Single(BirthRecord),
    Pair(CompatibilityPair),
}

impl FortuneSubject {
    pub fn describe(&self) -> String {
        match self {
            FortuneSubject::Single(record) => record.describe(),
            FortuneSubject::Pair(pair) => pair.describe(),
        }
    }

    /// 접속 로그에 남길 대표 출생 정보 (궁합은 첫 번째 사람)
    pub fn primary(&self) -> &BirthRecord {
        match self {
            FortuneSubject::Single(record) => record,
            FortuneSubject::Pair(pair) => &pair.first,
        }
    }
}

/// 검증이 끝난 운세 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneRequest {
    pub category: String,
    pub subject: FortuneSubject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_solar_record_with_gender() {
        // Arrange
        let record = BirthRecord::new("1990-01-01")
            .with_time("14:30")
            .with_gender(Gender::Male);

        // Act
        let clause = record.describe();

        // Assert
        assert_eq!(
            clause,
            "생년월일: 1990-01-01 (양력), 출생시간: 14:30, 성별: 남성"
        );
    }

    #[test]
    fn should_include_original_lunar_date() {
        let record = BirthRecord::new("2000-03-01").with_calendar(CalendarType::Lunar);

        let clause = record.describe();

        assert!(clause.starts_with("생년월일: 2000-04-05 (양력)"));
        assert!(clause.contains("[원래 음력: 2000-03-01]"));
        assert!(clause.contains("출생시간: 모름"));
        assert!(!clause.contains("성별"));
    }

    #[test]
    fn should_keep_unconvertible_lunar_date_as_is() {
        let record = BirthRecord::new("1850-01-01").with_calendar(CalendarType::Lunar);

        assert_eq!(record.solar_date(), "1850-01-01");
        assert!(record.describe().contains("[원래 음력: 1850-01-01]"));
    }

    #[test]
    fn should_parse_gender_values() {
        assert_eq!(Gender::parse(Some("male")), Gender::Male);
        assert_eq!(Gender::parse(Some("female")), Gender::Female);
        assert_eq!(Gender::parse(Some("")), Gender::Unspecified);
        assert_eq!(Gender::parse(Some("other")), Gender::Unspecified);
        assert_eq!(Gender::parse(None), Gender::Unspecified);
    }

    #[test]
    fn should_treat_anything_but_lunar_as_solar() {
        assert_eq!(CalendarType::parse(Some("lunar")), CalendarType::Lunar);
        assert_eq!(CalendarType::parse(Some("solar")), CalendarType::Solar);
        assert_eq!(CalendarType::parse(Some("LUNAR")), CalendarType::Solar);
        assert_eq!(CalendarType::parse(None), CalendarType::Solar);
    }

    #[test]
    fn should_join_pair_on_two_lines() {
        let pair = CompatibilityPair {
            first: BirthRecord::new("1990-01-01").with_gender(Gender::Male),
            second: BirthRecord::new("1992-05-05").with_gender(Gender::Female),
        };

        let clause = FortuneSubject::Pair(pair).describe();

        let lines: Vec<&str> = clause.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("첫 번째 사람: 생년월일: 1990-01-01 (양력)"));
        assert!(lines[1].starts_with("두 번째 사람: 생년월일: 1992-05-05 (양력)"));
        assert!(lines[1].ends_with("성별: 여성"));
    }
}
