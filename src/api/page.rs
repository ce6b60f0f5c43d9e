//! Server-rendered form and result pages.

use std::fmt::Write;

use crate::domain::catalog::{Gender, HOUR_SLOT_LABELS, TOPICS};
use crate::domain::fortune::CLOSING_ADVICE;
use crate::domain::outlook::stars;
use crate::domain::resolver::{MAX_BIRTH_YEAR, MIN_BIRTH_YEAR};
use crate::reading::{Reading, ReadingRequest};

pub const TITLE: &str = "⛩️ 천기누설 대만신";

const STYLE: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Nanum+Myeongjo:wght@400;700;800&display=swap');
* {font-family: 'Nanum Myeongjo', serif;}
body {max-width: 720px; margin: 0 auto; padding: 12px;}
h1 {font-size: 28px; font-weight: 800; color: #111; text-align: center; margin-bottom: 10px;}
.subtitle {text-align: center; color: #666; font-size: 14px;}
form {background-color: #fcfcfc; padding: 15px; border-radius: 15px; border: 1px solid #ddd; box-shadow: 0 2px 5px rgba(0,0,0,0.05);}
form label {display: block; margin: 8px 0;}
button {width: 100%; background-color: #d32f2f; color: white; font-weight: bold; font-size: 18px; padding: 12px; border-radius: 12px; border: none;}
button:hover {background-color: #b71c1c;}
.error {background: #fdecea; color: #b71c1c; padding: 12px; border-radius: 8px;}
.success {background: #e8f5e9; padding: 12px; border-radius: 8px;}
.pillars {display: grid; grid-template-columns: repeat(4, 1fr); gap: 8px;}
.pillar {background: #f8f9fa; padding: 10px; border-radius: 5px; text-align: center;}
.pillar span {font-size: 20px; color: #d32f2f;}
.result-card {background-color: #fff; padding: 20px; border-radius: 10px; border-left: 5px solid #d32f2f; box-shadow: 0 2px 5px rgba(0,0,0,0.1); margin-bottom: 15px;}
.months {display: grid; grid-template-columns: 1fr 1fr; grid-auto-flow: column; grid-template-rows: repeat(6, auto);}
.advice {background: #e3f2fd; padding: 12px; border-radius: 8px;}
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>천기누설 대만신</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{TITLE}</h1>\n\
         <div class=\"subtitle\">신령님의 영험한 기운으로 당신의 운명을 점쳐드립니다.</div>\n<hr>\n\
         {body}</body>\n</html>\n"
    )
}

fn option(out: &mut String, value: &str, label: &str, selected: bool) {
    let _ = writeln!(
        out,
        "<option value=\"{}\"{}>{}</option>",
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    );
}

fn form(values: &ReadingRequest) -> String {
    let mut out = String::new();
    out.push_str("<form method=\"get\" action=\"/reading\">\n");

    let _ = writeln!(
        out,
        "<label>이름 <input type=\"text\" name=\"name\" placeholder=\"예: 박성우\" value=\"{}\"></label>",
        escape(&values.name)
    );

    out.push_str("<label>성별 <select name=\"gender\">\n");
    for gender in [Gender::Male, Gender::Female] {
        option(&mut out, gender.label(), gender.label(), values.gender == gender);
    }
    out.push_str("</select></label>\n");

    let _ = writeln!(
        out,
        "<label>생년 <input type=\"number\" name=\"year\" min=\"{MIN_BIRTH_YEAR}\" max=\"{MAX_BIRTH_YEAR}\" value=\"{}\"></label>",
        values.year
    );

    out.push_str("<label>월 <select name=\"month\">\n");
    for m in 1..=12u32 {
        option(&mut out, &m.to_string(), &m.to_string(), values.month == m);
    }
    out.push_str("</select></label>\n<label>일 <select name=\"day\">\n");
    for d in 1..=31u32 {
        option(&mut out, &d.to_string(), &d.to_string(), values.day == d);
    }
    out.push_str("</select></label>\n");

    let checked = |on: bool| if on { " checked" } else { "" };
    let _ = writeln!(
        out,
        "<label><input type=\"checkbox\" name=\"lunar\"{}> 음력</label>\n\
         <label><input type=\"checkbox\" name=\"leap_month\"{}> 윤달</label>",
        checked(values.lunar),
        checked(values.leap_month)
    );

    out.push_str("<label>태어난 시 <select name=\"hour_slot\">\n");
    for (i, label) in HOUR_SLOT_LABELS.iter().enumerate() {
        option(&mut out, &i.to_string(), label, values.hour_slot == i);
    }
    out.push_str("</select></label>\n<label>상담 주제 <select name=\"topic\">\n");
    for topic in TOPICS {
        option(&mut out, topic, topic, values.topic == topic);
    }
    out.push_str("</select></label>\n<br>\n");

    out.push_str("<button type=\"submit\">🔥 내 운명 확인하기 (Click)</button>\n</form>\n");
    out
}

/// The form, followed by an error banner when there is one.
pub fn form_page(values: &ReadingRequest, error: Option<&str>) -> String {
    let mut body = form(values);
    if let Some(error) = error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(error));
    }
    layout(&body)
}

pub fn result_page(values: &ReadingRequest, reading: &Reading, outlook_year: i32) -> String {
    let mut body = form(values);
    let topic = escape(&reading.topic);

    let _ = writeln!(body, "<hr>\n<p class=\"success\">{}</p>", escape(&reading.headline));

    body.push_str("<h3>1. 귀하의 사주팔자(四柱八字)</h3>\n<div class=\"pillars\">\n");
    for (title, pillar) in reading.pillars.titled() {
        let _ = writeln!(
            body,
            "<div class=\"pillar\"><b>{title}</b><br><span>{pillar}</span></div>"
        );
    }
    body.push_str("</div>\n<br>\n");

    let _ = writeln!(
        body,
        "<h3>2. {topic} 정밀 진단</h3>\n<div class=\"result-card\">\n\
         <b>[신령님의 공수]</b><br><br>\n{}<br><br>\n<b>[상세 풀이]</b><br>\n{}\n</div>",
        escape(&reading.opening_line),
        escape(reading.detail)
    );

    let _ = writeln!(body, "<h3>3. {outlook_year}년 월별 흐름</h3>\n<div class=\"months\">");
    for (i, score) in reading.monthly_scores.iter().enumerate() {
        let _ = writeln!(
            body,
            "<div><b>{}월 ({}점):</b> {}</div>",
            i + 1,
            score,
            stars(*score)
        );
    }
    body.push_str("</div>\n<br>\n");

    let _ = writeln!(body, "<p class=\"advice\">{}</p>", escape(CLOSING_ADVICE));
    layout(&body)
}
