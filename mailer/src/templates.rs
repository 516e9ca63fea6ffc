//! HTML bodies for every transactional email.

use crate::template::Template;

/// Sent once after sign-up. Tokens: `name`, `intro`.
pub const WELCOME: Template = Template {
    name: "welcome",
    tokens: &["name", "intro"],
    html: r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Welcome to Signalist</title>
</head>
<body style="margin: 0; padding: 0; background-color: #050505; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: #050505;">
        <tr>
            <td align="center" style="padding: 40px 20px;">
                <table role="presentation" width="100%" style="max-width: 600px; background-color: #141414; border-radius: 8px; border: 1px solid #30333A;">
                    <tr>
                        <td style="padding: 40px;">
                            <h1 style="margin: 0 0 24px; color: #FDD458; font-size: 24px;">Welcome aboard {{name}}</h1>
                            <div style="margin: 0 0 24px; color: #CCDADC; font-size: 16px; line-height: 1.6;">{{intro}}</div>
                            <p style="margin: 0 0 12px; color: #CCDADC; font-size: 16px;">Here's what you can do right now:</p>
                            <ul style="margin: 0 0 30px; padding-left: 20px; color: #CCDADC; font-size: 16px; line-height: 1.8;">
                                <li>Set up your watchlist to follow your favorite stocks</li>
                                <li>Create price and volume alerts so you never miss a move</li>
                                <li>Explore the dashboard for trends and the latest market news</li>
                            </ul>
                            <p style="margin: 0 0 30px; color: #CCDADC; font-size: 16px;">We'll keep you informed with timely, concise updates, so you can focus on decisions.</p>
                            <a href="https://signalist-mauve.vercel.app/" style="display: inline-block; background-color: #FDD458; color: #000000; padding: 14px 28px; text-decoration: none; border-radius: 8px; font-weight: 600;">Go to Dashboard</a>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 20px 40px; border-top: 1px solid #30333A; color: #9095A1; font-size: 13px;">
                            Signalist &middot; Built to track the market, not to give financial advice.
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
};

/// Daily market digest. Tokens: `date`, `newsContent`.
pub const NEWS_SUMMARY: Template = Template {
    name: "news_summary",
    tokens: &["date", "newsContent"],
    html: r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Market News Summary</title>
</head>
<body style="margin: 0; padding: 0; background-color: #050505; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: #050505;">
        <tr>
            <td align="center" style="padding: 40px 20px;">
                <table role="presentation" width="100%" style="max-width: 600px; background-color: #141414; border-radius: 8px; border: 1px solid #30333A;">
                    <tr>
                        <td style="padding: 40px;">
                            <h1 style="margin: 0 0 8px; color: #FDD458; font-size: 24px;">Market News Summary Today</h1>
                            <p style="margin: 0 0 30px; color: #6B7280; font-size: 14px;">{{date}}</p>
                            <div style="color: #CCDADC; font-size: 16px; line-height: 1.6;">{{newsContent}}</div>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 20px 40px; border-top: 1px solid #30333A; color: #9095A1; font-size: 13px;">
                            You're receiving this because you subscribed to Signalist news updates.
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
};

/// Nudge for users who have not been back in a while.
/// Tokens: `name`, `dashboardUrl`, `unsubscribeUrl`.
pub const INACTIVE_USER_REMINDER: Template = Template {
    name: "inactive_user_reminder",
    tokens: &["name", "dashboardUrl", "unsubscribeUrl"],
    html: r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>We miss you at Signalist</title>
</head>
<body style="margin: 0; padding: 0; background-color: #050505; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: #050505;">
        <tr>
            <td align="center" style="padding: 40px 20px;">
                <table role="presentation" width="100%" style="max-width: 600px; background-color: #141414; border-radius: 8px; border: 1px solid #30333A;">
                    <tr>
                        <td style="padding: 40px;">
                            <h1 style="margin: 0 0 24px; color: #FDD458; font-size: 24px;">We Miss You, {{name}}!</h1>
                            <p style="margin: 0 0 20px; color: #CCDADC; font-size: 16px; line-height: 1.6;">We noticed you haven't visited Signalist in a while. The markets have been moving, and there might be some opportunities you don't want to miss!</p>
                            <p style="margin: 0 0 30px; color: #CCDADC; font-size: 16px; line-height: 1.6;">Your watchlists and alerts are still active and ready to help you stay on top of your investments.</p>
                            <a href="{{dashboardUrl}}" style="display: inline-block; background-color: #FDD458; color: #000000; padding: 14px 28px; text-decoration: none; border-radius: 8px; font-weight: 600;">Return to Dashboard</a>
                            <p style="margin: 30px 0 0; color: #9095A1; font-size: 14px;">Or open <a href="{{dashboardUrl}}" style="color: #FDD458;">your dashboard</a> directly.</p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 20px 40px; border-top: 1px solid #30333A; color: #9095A1; font-size: 13px;">
                            Don't want these reminders? <a href="{{unsubscribeUrl}}" style="color: #9095A1;">Unsubscribe</a>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
};

/// Price crossed above the target.
/// Tokens: `symbol`, `company`, `currentPrice`, `targetPrice`, `timestamp`.
pub const STOCK_ALERT_UPPER: Template = Template {
    name: "stock_alert_upper",
    tokens: &["symbol", "company", "currentPrice", "targetPrice", "timestamp"],
    html: r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Price Alert: {{symbol}}</title>
</head>
<body style="margin: 0; padding: 0; background-color: #050505; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: #050505;">
        <tr>
            <td align="center" style="padding: 40px 20px;">
                <table role="presentation" width="100%" style="max-width: 600px; background-color: #141414; border-radius: 8px; border: 1px solid #30333A;">
                    <tr>
                        <td style="padding: 40px;">
                            <p style="margin: 0 0 8px; color: #0FEDBE; font-size: 14px; font-weight: 600;">PRICE ABOVE TARGET</p>
                            <h1 style="margin: 0 0 4px; color: #FFFFFF; font-size: 28px;">{{symbol}}</h1>
                            <p style="margin: 0 0 24px; color: #9095A1; font-size: 16px;">{{company}}</p>
                            <table role="presentation" width="100%" style="margin: 0 0 24px; background-color: #212328; border-radius: 8px;">
                                <tr>
                                    <td style="padding: 16px; color: #9095A1; font-size: 14px;">Current price</td>
                                    <td style="padding: 16px; color: #0FEDBE; font-size: 20px; font-weight: 700; text-align: right;">{{currentPrice}}</td>
                                </tr>
                                <tr>
                                    <td style="padding: 16px; color: #9095A1; font-size: 14px;">Your target</td>
                                    <td style="padding: 16px; color: #FFFFFF; font-size: 16px; text-align: right;">{{targetPrice}}</td>
                                </tr>
                            </table>
                            <p style="margin: 0 0 24px; color: #CCDADC; font-size: 15px; line-height: 1.6;">{{symbol}} has risen above your target price of {{targetPrice}}. This might be a good time to review your position.</p>
                            <p style="margin: 0; color: #6B7280; font-size: 13px;">Alert triggered at {{timestamp}}</p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
};

/// Price crossed below the target. Same tokens as [`STOCK_ALERT_UPPER`].
pub const STOCK_ALERT_LOWER: Template = Template {
    name: "stock_alert_lower",
    tokens: &["symbol", "company", "currentPrice", "targetPrice", "timestamp"],
    html: r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Price Alert: {{symbol}}</title>
</head>
<body style="margin: 0; padding: 0; background-color: #050505; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: #050505;">
        <tr>
            <td align="center" style="padding: 40px 20px;">
                <table role="presentation" width="100%" style="max-width: 600px; background-color: #141414; border-radius: 8px; border: 1px solid #30333A;">
                    <tr>
                        <td style="padding: 40px;">
                            <p style="margin: 0 0 8px; color: #FF495B; font-size: 14px; font-weight: 600;">PRICE BELOW TARGET</p>
                            <h1 style="margin: 0 0 4px; color: #FFFFFF; font-size: 28px;">{{symbol}}</h1>
                            <p style="margin: 0 0 24px; color: #9095A1; font-size: 16px;">{{company}}</p>
                            <table role="presentation" width="100%" style="margin: 0 0 24px; background-color: #212328; border-radius: 8px;">
                                <tr>
                                    <td style="padding: 16px; color: #9095A1; font-size: 14px;">Current price</td>
                                    <td style="padding: 16px; color: #FF495B; font-size: 20px; font-weight: 700; text-align: right;">{{currentPrice}}</td>
                                </tr>
                                <tr>
                                    <td style="padding: 16px; color: #9095A1; font-size: 14px;">Your target</td>
                                    <td style="padding: 16px; color: #FFFFFF; font-size: 16px; text-align: right;">{{targetPrice}}</td>
                                </tr>
                            </table>
                            <p style="margin: 0 0 24px; color: #CCDADC; font-size: 15px; line-height: 1.6;">{{symbol}} has dropped below your target price of {{targetPrice}}. This might be a good time to review your position.</p>
                            <p style="margin: 0; color: #6B7280; font-size: 13px;">Alert triggered at {{timestamp}}</p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
};

/// Every template, for checks that apply to all of them.
pub const ALL: &[Template] = &[
    WELCOME,
    NEWS_SUMMARY,
    INACTIVE_USER_REMINDER,
    STOCK_ALERT_UPPER,
    STOCK_ALERT_LOWER,
];
