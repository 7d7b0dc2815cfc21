/*
[INPUT]:  Wallet account names, market pairs, order parameters, selectors
[OUTPUT]: Balances, open orders, submissions and batch cancellations
[POS]:    HTTP layer - wallet account endpoints (orders and balances)
[UPDATE]: When adding wallet endpoints or changing order reconciliation
*/

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::http::{BtsxClient, Result};
use crate::reconcile::{OrderSelector, price_scale, scale_amount, select_orders};
use crate::types::{AccountBalances, OpenOrder, OrderMatches, OrderSubmission, Side};

const CANCEL_METHOD: &str = "wallet_market_cancel_order";
/// `wallet_market_order_list` limit meaning "all orders"
const ALL_ORDERS: i64 = -1;

impl BtsxClient {
    /// Balance of `asset` held by `account`, in display units.
    ///
    /// Returns zero when the wallet reports no balances for the account or the
    /// asset does not appear among them. An unknown asset symbol is an error.
    ///
    /// RPC: wallet_account_balance [account, asset]
    pub async fn get_balance(&self, account: &str, asset: &str) -> Result<Decimal> {
        let record = self.get_asset(asset).await?;

        let balances: Option<Vec<AccountBalances>> = self
            .call_result("wallet_account_balance", vec![json!(account), json!(asset)])
            .await?;

        let Some(AccountBalances(_, entries)) = balances.and_then(|list| list.into_iter().next())
        else {
            debug!(account, asset, "no balance entry for account");
            return Ok(Decimal::ZERO);
        };

        match entries.iter().find(|entry| entry.0 == record.id) {
            Some(entry) => scale_amount(entry.1, record.precision),
            None => Ok(Decimal::ZERO),
        }
    }

    /// Offer to buy `amount` of `amount_symbol` at `price` units of `price_symbol` each
    ///
    /// RPC: bid [account, amount, amount_symbol, price, price_symbol]
    pub async fn submit_bid(
        &self,
        account: &str,
        amount: Decimal,
        amount_symbol: &str,
        price: Decimal,
        price_symbol: &str,
    ) -> Result<OrderSubmission> {
        self.submit_order(Side::Bid, account, amount, amount_symbol, price, price_symbol)
            .await
    }

    /// Offer to sell `amount` of `amount_symbol` at `price` units of `price_symbol` each
    ///
    /// RPC: ask [account, amount, amount_symbol, price, price_symbol]
    pub async fn submit_ask(
        &self,
        account: &str,
        amount: Decimal,
        amount_symbol: &str,
        price: Decimal,
        price_symbol: &str,
    ) -> Result<OrderSubmission> {
        self.submit_order(Side::Ask, account, amount, amount_symbol, price, price_symbol)
            .await
    }

    async fn submit_order(
        &self,
        side: Side,
        account: &str,
        amount: Decimal,
        amount_symbol: &str,
        price: Decimal,
        price_symbol: &str,
    ) -> Result<OrderSubmission> {
        let params = vec![
            json!(account),
            json!(amount.normalize().to_string()),
            json!(amount_symbol),
            json!(price.normalize().to_string()),
            json!(price_symbol),
        ];

        match self.call_result::<Value>(side.as_str(), params).await {
            Ok(result) => {
                info!(
                    account,
                    side = side.as_str(),
                    %amount,
                    amount_symbol,
                    %price,
                    price_symbol,
                    "order submitted"
                );
                Ok(OrderSubmission(result.unwrap_or(Value::Null)))
            }
            Err(err) => {
                warn!(
                    account,
                    side = side.as_str(),
                    %amount,
                    amount_symbol,
                    %price,
                    price_symbol,
                    error = %err,
                    "order submission failed"
                );
                Err(err)
            }
        }
    }

    /// All open orders of `account` in the market, in wallet order
    ///
    /// RPC: wallet_market_order_list [base, quote, -1, account]
    pub async fn list_orders(&self, account: &str, base: &str, quote: &str) -> Result<Vec<OpenOrder>> {
        Ok(self
            .call_result(
                "wallet_market_order_list",
                vec![json!(base), json!(quote), json!(ALL_ORDERS), json!(account)],
            )
            .await?
            .unwrap_or_default())
    }

    /// Orders of one side whose scaled ratio satisfies the selector's predicate.
    ///
    /// Ratios are scaled by `precision(base) / precision(quote)`; the balance
    /// total is in quote units for bids and base units for asks.
    pub async fn get_orders_matching(
        &self,
        account: &str,
        base: &str,
        quote: &str,
        selector: &OrderSelector,
    ) -> Result<OrderMatches> {
        let orders = self.list_orders(account, base, quote).await?;
        if orders.is_empty() {
            return Ok(OrderMatches::default());
        }

        let base_precision = self.get_precision(base).await?;
        let quote_precision = self.get_precision(quote).await?;
        let scale = price_scale(base_precision, quote_precision)?;
        let governing_precision = match selector.side {
            Side::Bid => quote_precision,
            Side::Ask => base_precision,
        };

        let matches = select_orders(&orders, selector, scale, governing_precision)?;
        for order_id in &matches.order_ids {
            debug!(account, order_id = %order_id, side = selector.side.as_str(), "order selected");
        }
        Ok(matches)
    }

    /// Cancel orders in a single `batch` request; an empty list sends nothing
    ///
    /// RPC: batch ["wallet_market_cancel_order", [[id], ...]]
    pub async fn cancel_orders(&self, account: &str, order_ids: &[String]) -> Result<Vec<Value>> {
        if order_ids.is_empty() {
            debug!(account, "nothing to cancel");
            return Ok(Vec::new());
        }

        let params_list: Vec<Value> = order_ids.iter().map(|id| json!([id])).collect();
        let results = self
            .call_result("batch", vec![json!(CANCEL_METHOD), Value::Array(params_list)])
            .await?
            .unwrap_or_default();

        info!(account, count = order_ids.len(), "orders cancelled");
        Ok(results)
    }

    /// Select with `selector` and cancel whatever matched
    pub async fn cancel_orders_matching(
        &self,
        account: &str,
        base: &str,
        quote: &str,
        selector: &OrderSelector,
    ) -> Result<OrderMatches> {
        let matches = self.get_orders_matching(account, base, quote, selector).await?;
        self.cancel_orders(account, &matches.order_ids).await?;
        Ok(matches)
    }

    /// Cancel every open order of `account` in the market and return their ids
    pub async fn cancel_all_orders(&self, account: &str, base: &str, quote: &str) -> Result<Vec<String>> {
        let orders = self.list_orders(account, base, quote).await?;

        let mut seen = HashSet::new();
        let order_ids: Vec<String> = orders
            .into_iter()
            .map(|open| open.id)
            .filter(|id| seen.insert(id.clone()))
            .collect();

        self.cancel_orders(account, &order_ids).await?;
        Ok(order_ids)
    }
}
