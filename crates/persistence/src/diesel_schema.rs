// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    allowances (allowance_id) {
        allowance_id -> BigInt,
        user_id -> BigInt,
        financial_year_id -> BigInt,
        total_half_days -> Integer,
    }
}

diesel::table! {
    departments (department_id) {
        department_id -> BigInt,
        name -> Text,
    }
}

diesel::table! {
    financial_years (financial_year_id) {
        financial_year_id -> BigInt,
        name -> Text,
        start_at -> Text,
        end_at -> Text,
    }
}

diesel::table! {
    holiday_requests (request_id) {
        request_id -> BigInt,
        user_id -> BigInt,
        financial_year_id -> BigInt,
        start_date -> Text,
        start_half -> Text,
        end_date -> Text,
        end_half -> Text,
        days_half_days -> Integer,
        status -> Text,
        created_at -> Text,
        reviewed_by -> Nullable<BigInt>,
        reviewed_at -> Nullable<Text>,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        user_id -> BigInt,
        created_at -> Text,
        last_activity_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    settings (setting_id) {
        setting_id -> BigInt,
        default_allowance_half_days -> Integer,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> BigInt,
        name -> Text,
        email -> Text,
        role -> Text,
        department_id -> BigInt,
        avatar_url -> Nullable<Text>,
        is_archived -> Integer,
        created_at -> Text,
    }
}

diesel::joinable!(allowances -> financial_years (financial_year_id));
diesel::joinable!(allowances -> users (user_id));
diesel::joinable!(holiday_requests -> financial_years (financial_year_id));
diesel::joinable!(holiday_requests -> users (user_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    allowances,
    departments,
    financial_years,
    holiday_requests,
    sessions,
    settings,
    users,
);
