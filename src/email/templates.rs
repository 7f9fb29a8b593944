use chrono::{DateTime, FixedOffset, Utc};

use crate::models::LeadRecord;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━";
const BLANK: &str = "（未記入）";

fn or_blank(value: &str) -> &str {
    if value.trim().is_empty() { BLANK } else { value }
}

/// Submission time as shown to operators (Japan Standard Time).
pub fn format_jst(at: DateTime<Utc>) -> String {
    const FORMAT: &str = "%Y/%m/%d %H:%M:%S";
    match FixedOffset::east_opt(9 * 3600) {
        Some(jst) => at.with_timezone(&jst).format(FORMAT).to_string(),
        None => at.format(FORMAT).to_string(),
    }
}

pub fn operator_subject(record: &LeadRecord) -> String {
    format!("【新規相談申込み】{}様", record.name)
}

pub fn render_operator_alert(record: &LeadRecord, records_url: &str) -> String {
    format!(
        "新しい相談申込みがありました。

{RULE}
■ お名前
{name}

■ メールアドレス
{email}

■ 職種・役職
{job}

■ 相談内容
{content}

■ 希望日時（第1〜3希望）
{datetime}

■ 流入経路
{source}

■ 申込み日時
{submitted_at}
{RULE}

記録先で詳細を確認:
{records_url}",
        name = record.name,
        email = record.email,
        job = or_blank(&record.job),
        content = record.content,
        datetime = record.datetime,
        source = or_blank(&record.source),
        submitted_at = format_jst(record.submitted_at),
    )
}

pub fn confirmation_subject(brand: &str) -> String {
    format!("【無料相談お申し込み受付】{brand}")
}

pub fn render_confirmation(record: &LeadRecord, brand: &str) -> String {
    format!(
        "{name} 様

この度は無料相談にお申し込みいただき、ありがとうございます。

以下の内容で受け付けました。
2営業日以内にメールでご連絡いたしますので、しばらくお待ちください。

{RULE}
■ お名前
{name}

■ メールアドレス
{email}

■ 職種・役職
{job}

■ 相談内容
{content}

■ 希望日時（第1〜3希望）
{datetime}
{RULE}

※ このメールは自動送信されています。
※ ご不明点がございましたら、このメールに返信してください。

――――――――――――――――――――
{brand}
――――――――――――――――――――",
        name = record.name,
        email = record.email,
        job = or_blank(&record.job),
        content = record.content,
        datetime = record.datetime,
    )
}
