//! 접속 로그 엑셀(xlsx) 내보내기

use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};

use super::dto::TIMESTAMP_FORMAT;
use super::entity::access_log;
use crate::utils::error::AppError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "접속 로그";

/// (헤더, 열 너비)
const COLUMNS: [(&str, f64); 8] = [
    ("번호", 8.0),
    ("접속시간", 20.0),
    ("IP주소", 15.0),
    ("운세종류", 15.0),
    ("생년월일", 15.0),
    ("출생시간", 15.0),
    ("성별", 10.0),
    ("양/음력", 12.0),
];

const HEADER_FILL: u32 = 0x667EEA;

/// 값이 없을 때 표기
const EMPTY_CELL: &str = "-";

/// 다운로드 파일 이름: `도사운세_접속로그_YYYYMMDD_HHMMSS.xlsx`
pub fn export_filename(now: NaiveDateTime) -> String {
    format!("도사운세_접속로그_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// 한글 파일명을 위한 `Content-Disposition` 값
///
/// 구형 클라이언트용 ASCII `filename`과 RFC 5987 `filename*`을 함께 보냅니다.
pub fn content_disposition(now: NaiveDateTime) -> String {
    let fallback = format!("dosa_access_logs_{}.xlsx", now.format("%Y%m%d_%H%M%S"));
    let encoded = utf8_percent_encode(&export_filename(now), NON_ALPHANUMERIC).to_string();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

/// 접속 로그를 xlsx 통합 문서로 직렬화합니다. 번호는 1부터 매깁니다.
pub fn logs_to_xlsx(logs: &[access_log::Model]) -> Result<Vec<u8>, AppError> {
    build_workbook(logs).map_err(|e| AppError::InternalError(format!("엑셀 생성 실패: {}", e)))
}

fn build_workbook(logs: &[access_log::Model]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (col, (title, width)) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header_format)?;
        sheet.set_column_width(col, width)?;
    }

    for (row, log) in (1u32..).zip(logs) {
        let cell = |value: &Option<String>| value.as_deref().unwrap_or(EMPTY_CELL).to_string();

        sheet.write_number(row, 0, row)?;
        sheet.write_string(row, 1, log.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
        sheet.write_string(row, 2, cell(&log.ip_address))?;
        sheet.write_string(row, 3, cell(&log.fortune_type))?;
        sheet.write_string(row, 4, cell(&log.birth_date))?;
        sheet.write_string(row, 5, cell(&log.birth_time))?;
        sheet.write_string(row, 6, cell(&log.gender))?;
        sheet.write_string(row, 7, cell(&log.calendar_type))?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

    fn log(id: i32, ip: Option<&str>) -> access_log::Model {
        access_log::Model {
            id,
            ip_address: ip.map(str::to_string),
            user_agent: None,
            birth_date: Some("1990-01-01".into()),
            birth_time: Some("모름".into()),
            gender: Some("male".into()),
            calendar_type: Some("solar".into()),
            fortune_type: Some("오늘의 운세".into()),
            timestamp: NaiveDateTime::parse_from_str("2025-01-01 09:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            location: None,
        }
    }

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn should_build_xlsx_workbook() {
        // Arrange
        let logs = vec![log(10, Some("1.2.3.4")), log(7, None)];

        // Act
        let bytes = logs_to_xlsx(&logs).unwrap();

        // Assert
        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[test]
    fn should_build_workbook_for_no_logs() {
        let bytes = logs_to_xlsx(&[]).unwrap();

        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[test]
    fn should_name_file_with_timestamp() {
        assert_eq!(
            export_filename(at("2025-03-14 18:05:09")),
            "도사운세_접속로그_20250314_180509.xlsx"
        );
    }

    #[test]
    fn should_send_ascii_fallback_and_encoded_korean_name() {
        let disposition = content_disposition(at("2025-03-14 18:05:09"));

        assert!(disposition.starts_with(
            "attachment; filename=\"dosa_access_logs_20250314_180509.xlsx\"; filename*=UTF-8''"
        ));
        // "도" = EB 8F 84
        assert!(disposition.contains("filename*=UTF-8''%EB%8F%84"));
        assert!(disposition.ends_with("20250314%5F180509%2Exlsx"));
        assert!(disposition.is_ascii());
    }
}
