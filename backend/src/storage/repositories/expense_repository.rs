use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite};
use tracing::debug;
use uuid::Uuid;

use crate::domain::models::{
    Collection, DailyExpenseRecord, ExpenseRecord, Field, GroupBy, GroupKey, GroupSum, Month,
    MonthlyBillRecord, OccasionalExpenseRecord, Period, RecordFilter, TimePredicate, UserId,
};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ExpenseStore;

/// Text layout of stored dates; fixed width keeps string order chronological
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

const YEAR_OF_DATE: &str = "CAST(strftime('%Y', date) AS INTEGER)";
const MONTH_OF_DATE: &str = "CAST(strftime('%m', date) AS INTEGER)";

enum SqlArg {
    Text(String),
    Int(i64),
}

/// Repository over the three SQLite record tables
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a daily expense record
    pub async fn insert_daily(&self, record: &DailyExpenseRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO daily_expenses (user_id, date, food, travel, entertainment, shopping, others, total)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.user_id.to_string())
        .bind(format_date(record.date))
        .bind(record.food)
        .bind(record.travel)
        .bind(record.entertainment)
        .bind(record.shopping)
        .bind(record.others)
        .bind(record.total)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Store a monthly bill record
    pub async fn insert_monthly(&self, record: &MonthlyBillRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO monthly_bills (user_id, month, year, electricity, water, rent, others, total)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.user_id.to_string())
        .bind(record.month.name())
        .bind(record.year)
        .bind(record.electricity)
        .bind(record.water)
        .bind(record.rent)
        .bind(record.others)
        .bind(record.total)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Store an occasional expense record
    pub async fn insert_occasional(&self, record: &OccasionalExpenseRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO occasional_expenses (user_id, date, insurance, school_fee, repair, total)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.user_id.to_string())
        .bind(format_date(record.date))
        .bind(record.insurance)
        .bind(record.school_fee)
        .bind(record.repair)
        .bind(record.total)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn insert(&self, record: &ExpenseRecord) -> Result<()> {
        match record {
            ExpenseRecord::Daily(r) => self.insert_daily(r).await,
            ExpenseRecord::Monthly(r) => self.insert_monthly(r).await,
            ExpenseRecord::Occasional(r) => self.insert_occasional(r).await,
        }
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn query(&self, collection: Collection, filter: &RecordFilter) -> Result<Vec<ExpenseRecord>> {
        let (clause, args) = filter_clause(collection, filter);
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY id",
            record_columns(collection),
            table(collection),
            clause
        );
        debug!("Querying {} records: {}", collection, sql);

        let rows = bind_all(sqlx::query(&sql), args)
            .fetch_all(self.db.pool())
            .await
            .with_context(|| format!("failed to query {} records", collection))?;

        rows.iter().map(|row| decode_record(collection, row)).collect()
    }

    async fn aggregate_sum(
        &self,
        collection: Collection,
        filter: &RecordFilter,
        group_by: GroupBy,
        fields: &[Field],
    ) -> Result<Vec<GroupSum>> {
        let (clause, args) = filter_clause(collection, filter);

        // Fields the table lacks stay at zero
        let summed: Vec<Field> = fields
            .iter()
            .copied()
            .filter(|f| collection.has_field(*f))
            .collect();

        let mut select = Vec::new();
        let group_clause = match group_by {
            GroupBy::All => "",
            GroupBy::Period => {
                select.push(period_columns(collection).to_string());
                " GROUP BY group_year, group_month"
            }
        };
        select.push("COUNT(*) AS record_count".to_string());
        for field in &summed {
            select.push(format!("TOTAL({0}) AS {0}", field.column()));
        }

        let sql = format!(
            "SELECT {} FROM {} WHERE {}{}",
            select.join(", "),
            table(collection),
            clause,
            group_clause
        );
        debug!("Aggregating {} records: {}", collection, sql);

        let rows = bind_all(sqlx::query(&sql), args)
            .fetch_all(self.db.pool())
            .await
            .with_context(|| format!("failed to aggregate {} records", collection))?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in &rows {
            let record_count: i64 = row.try_get("record_count")?;
            // An ungrouped aggregate yields one row even when nothing matched
            if record_count <= 0 {
                continue;
            }

            let key = match group_by {
                GroupBy::All => GroupKey::All,
                GroupBy::Period => GroupKey::Period(decode_group_period(collection, row)?),
            };
            let mut group = GroupSum::new(key, fields);
            for field in &summed {
                group.sums.insert(*field, row.try_get::<f64, _>(field.column())?);
            }
            group.record_count = record_count as u64;
            groups.push(group);
        }

        Ok(groups)
    }
}

pub fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn table(collection: Collection) -> &'static str {
    match collection {
        Collection::Daily => "daily_expenses",
        Collection::Monthly => "monthly_bills",
        Collection::Occasional => "occasional_expenses",
    }
}

fn record_columns(collection: Collection) -> &'static str {
    match collection {
        Collection::Daily => {
            "user_id, date, food, travel, entertainment, shopping, others, total"
        }
        Collection::Monthly => {
            "user_id, month, year, electricity, water, rent, others, total"
        }
        Collection::Occasional => "user_id, date, insurance, school_fee, repair, total",
    }
}

fn period_columns(collection: Collection) -> String {
    if collection.is_dated() {
        format!(
            "{} AS group_month, {} AS group_year",
            MONTH_OF_DATE, YEAR_OF_DATE
        )
    } else {
        "month AS group_month, year AS group_year".to_string()
    }
}

/// WHERE clause and its arguments for `filter` against `collection`
fn filter_clause(collection: Collection, filter: &RecordFilter) -> (String, Vec<SqlArg>) {
    let mut clause = String::from("user_id = ?");
    let mut args = vec![SqlArg::Text(filter.user_id.to_string())];

    match &filter.time {
        TimePredicate::DateRange(range) if collection.is_dated() => {
            clause.push_str(" AND date >= ? AND date <= ?");
            args.push(SqlArg::Text(format_date(range.start())));
            args.push(SqlArg::Text(format_date(range.end())));
        }
        TimePredicate::StoredPeriods(periods) if !collection.is_dated() && !periods.is_empty() => {
            let alternatives = vec!["(month = ? AND year = ?)"; periods.len()].join(" OR ");
            clause.push_str(&format!(" AND ({})", alternatives));
            for period in periods {
                args.push(SqlArg::Text(period.month.name().to_string()));
                args.push(SqlArg::Int(i64::from(period.year)));
            }
        }
        TimePredicate::DerivedPeriod(period) if collection.is_dated() => {
            clause.push_str(&format!(" AND {} = ? AND {} = ?", YEAR_OF_DATE, MONTH_OF_DATE));
            args.push(SqlArg::Int(i64::from(period.year)));
            args.push(SqlArg::Int(i64::from(period.month.number())));
        }
        TimePredicate::DerivedYear(year) if collection.is_dated() => {
            clause.push_str(&format!(" AND {} = ?", YEAR_OF_DATE));
            args.push(SqlArg::Int(i64::from(*year)));
        }
        // The predicate reads fields this collection does not have
        _ => clause.push_str(" AND 0"),
    }

    (clause, args)
}

fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: Vec<SqlArg>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlArg::Text(value) => query.bind(value),
            SqlArg::Int(value) => query.bind(value),
        };
    }
    query
}

fn decode_user_id(row: &SqliteRow) -> Result<UserId> {
    let raw: String = row.try_get("user_id")?;
    Uuid::parse_str(&raw)
        .map(UserId::new)
        .with_context(|| format!("malformed user id `{}` in record store", raw))
}

fn decode_date(row: &SqliteRow) -> Result<NaiveDateTime> {
    let raw: String = row.try_get("date")?;
    NaiveDateTime::parse_from_str(&raw, DATE_FORMAT)
        .with_context(|| format!("malformed date `{}` in record store", raw))
}

fn decode_month(raw: &str) -> Result<Month> {
    raw.parse::<Month>()
        .map_err(|_| anyhow!("unknown month `{}` in record store", raw))
}

fn decode_year(raw: i64) -> Result<i32> {
    i32::try_from(raw).map_err(|_| anyhow!("year {} out of range", raw))
}

fn decode_group_period(collection: Collection, row: &SqliteRow) -> Result<Period> {
    let year = decode_year(row.try_get("group_year")?)?;
    let month = if collection.is_dated() {
        let number: i64 = row.try_get("group_month")?;
        u32::try_from(number)
            .ok()
            .and_then(Month::from_number)
            .ok_or_else(|| anyhow!("month number {} out of range", number))?
    } else {
        let name: String = row.try_get("group_month")?;
        decode_month(&name)?
    };
    Ok(Period::new(month, year))
}

fn decode_record(collection: Collection, row: &SqliteRow) -> Result<ExpenseRecord> {
    let user_id = decode_user_id(row)?;

    let record = match collection {
        Collection::Daily => ExpenseRecord::Daily(DailyExpenseRecord {
            user_id,
            date: decode_date(row)?,
            food: row.try_get("food")?,
            travel: row.try_get("travel")?,
            entertainment: row.try_get("entertainment")?,
            shopping: row.try_get("shopping")?,
            others: row.try_get("others")?,
            total: row.try_get("total")?,
        }),
        Collection::Monthly => {
            let month: String = row.try_get("month")?;
            ExpenseRecord::Monthly(MonthlyBillRecord {
                user_id,
                month: decode_month(&month)?,
                year: decode_year(row.try_get("year")?)?,
                electricity: row.try_get("electricity")?,
                water: row.try_get("water")?,
                rent: row.try_get("rent")?,
                others: row.try_get("others")?,
                total: row.try_get("total")?,
            })
        }
        Collection::Occasional => ExpenseRecord::Occasional(OccasionalExpenseRecord {
            user_id,
            date: decode_date(row)?,
            insurance: row.try_get("insurance")?,
            school_fee: row.try_get("school_fee")?,
            repair: row.try_get("repair")?,
            total: row.try_get("total")?,
        }),
    };

    Ok(record)
}
