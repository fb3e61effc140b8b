// Copyright (c) 2025 Citers Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Datelike, NaiveDate, Utc};

/// 解析YYYY-MM格式的月份字符串
pub fn parse_month(month: &str) -> Option<(i32, u32)> {
    let (year, month_num) = month.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month_num: u32 = month_num.parse().ok()?;
    if !(1..=12).contains(&month_num) {
        return None;
    }
    Some((year, month_num))
}

/// 返回某月份的首日与末日
///
/// 用于按爬取日期筛选该月份的引用窗口
pub fn month_bounds(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month_num) = parse_month(month)?;
    let first = NaiveDate::from_ymd_opt(year, month_num, 1)?;
    let next_first = if month_num == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1)?
    };
    let last = next_first.pred_opt()?;
    Some((first, last))
}

/// 返回某月份的爬取锚点日期
///
/// 固定使用15日作为月内的稳定锚点
pub fn crawl_anchor_date(month: &str) -> Option<NaiveDate> {
    let (year, month_num) = parse_month(month)?;
    NaiveDate::from_ymd_opt(year, month_num, 15)
}

/// 校验月份字符串格式
pub fn is_valid_month(month: &str) -> bool {
    parse_month(month).is_some()
}

/// 返回最近n个完整的日历月份，升序
///
/// 不含当前月，竞争对手作业缺省使用这个窗口
pub fn recent_months(n: u32) -> Vec<String> {
    let today = Utc::now().date_naive();
    let mut year = today.year();
    let mut month = today.month();
    let mut months = Vec::with_capacity(n as usize);
    for _ in 0..n {
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
        months.push(format!("{year:04}-{month:02}"));
    }
    months.reverse();
    months
}
