//! HTML rendering for the catalog page

use std::fmt::Write;

use shared::Product;

use crate::catalog::{FIELD_CODE, FIELD_IMAGE, FIELD_NAME, FIELD_QUANTITY};

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn render_row(out: &mut String, product: &Product, with_image: bool) {
    let _ = write!(
        out,
        "<tr><td><input type=\"checkbox\" name=\"{code}\"></td><td>{code}</td><td>{name}</td><td>{quantity}</td>",
        code = product.code,
        name = escape_html(&product.name),
        quantity = product.quantity,
    );
    if with_image {
        match &product.image_url {
            Some(url) => {
                let _ = write!(
                    out,
                    "<td><img src=\"{}\" alt=\"{}\" width=\"80\"></td>",
                    escape_html(url),
                    escape_html(&product.name)
                );
            }
            None => out.push_str("<td></td>"),
        }
    }
    out.push_str("</tr>\n");
}

/// Render the listing plus the add and delete forms
pub fn render_catalog(products: &[Product], image_upload: bool) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Products</title></head>\n<body>\n<h1>Products</h1>\n",
    );

    out.push_str("<form action=\"/delete\" method=\"post\">\n<table>\n<tr><th></th><th>Code</th><th>Name</th><th>Quantity</th>");
    if image_upload {
        out.push_str("<th>Image</th>");
    }
    out.push_str("</tr>\n");
    for product in products {
        render_row(&mut out, product, image_upload);
    }
    out.push_str("</table>\n<button type=\"submit\">Delete selected</button>\n</form>\n");

    if image_upload {
        out.push_str("<form action=\"/\" method=\"post\" enctype=\"multipart/form-data\">\n");
    } else {
        out.push_str("<form action=\"/\" method=\"post\">\n");
    }
    let _ = write!(
        out,
        "<input type=\"number\" name=\"{FIELD_CODE}\" placeholder=\"Code\" required>\n\
         <input type=\"text\" name=\"{FIELD_NAME}\" placeholder=\"Name\" required>\n\
         <input type=\"number\" name=\"{FIELD_QUANTITY}\" placeholder=\"Quantity\" required>\n"
    );
    if image_upload {
        let _ = writeln!(
            out,
            "<input type=\"file\" name=\"{FIELD_IMAGE}\" accept=\"image/jpeg,image/png,image/gif\" required>"
        );
    }
    out.push_str("<button type=\"submit\">Add product</button>\n</form>\n</body>\n</html>\n");

    out
}
